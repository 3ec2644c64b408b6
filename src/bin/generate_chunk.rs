//! Single-chunk generation utility
//!
//! Runs the full generation pipeline for one chunk and prints the result
//! record as JSON.
//!
//! Usage:
//!     generate_chunk [OPTIONS]
//!
//! Options:
//!     --content_type <TYPE>     creature, vegetation, mineral, ... (default: creature)
//!     --master_seed <SEED>      Master seed (default: 42)
//!     --density <D>             Point density in [0, 1] (default: 0.75)
//!     --chunk_coords <X,Y,Z>    Chunk coordinates (default: 0,0,0)
//!     --output_format <FMT>     fbx, gltf, glb or obj (default: fbx)
//!     --cache_dir <DIR>         Reuse and store results in this directory
//!     -h, --help                Show this help message

use std::env;
use std::path::PathBuf;

use chunkforge::generation::{
    CachedGenerator, ChunkCoord, ContentType, ExportFormat, GenerationPipeline, GenerationRequest,
};
use chunkforge::streaming::DiskChunkStore;

fn print_help() {
    eprintln!("generate_chunk - Single-chunk generation utility");
    eprintln!();
    eprintln!("Usage: generate_chunk [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --content_type <TYPE>     creature, vegetation, mineral, ... (default: creature)");
    eprintln!("    --master_seed <SEED>      Master seed (default: 42)");
    eprintln!("    --density <D>             Point density in [0, 1] (default: 0.75)");
    eprintln!("    --chunk_coords <X,Y,Z>    Chunk coordinates (default: 0,0,0)");
    eprintln!("    --output_format <FMT>     fbx, gltf, glb or obj (default: fbx)");
    eprintln!("    --cache_dir <DIR>         Reuse and store results in this directory");
    eprintln!("    -h, --help                Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    generate_chunk --content_type mineral --master_seed 7 --chunk_coords 1,-2,3");
}

#[derive(Debug)]
struct Args {
    request: GenerationRequest,
    cache_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut content_type = ContentType::Creature;
    let mut master_seed: u64 = 42;
    let mut density: f64 = 0.75;
    let mut chunk_coords = ChunkCoord::default();
    let mut output_format = ExportFormat::Fbx;
    let mut cache_dir: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "-h" || flag == "--help" {
            print_help();
            std::process::exit(0);
        }

        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag {
            "--content_type" => content_type = ContentType::parse(value),
            "--master_seed" => {
                master_seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
            }
            "--density" => {
                density = value
                    .parse()
                    .map_err(|_| format!("Invalid density: {}", value))?;
            }
            "--chunk_coords" => chunk_coords = value.parse().map_err(|e| format!("{}", e))?,
            "--output_format" => output_format = value.parse().map_err(|e| format!("{}", e))?,
            "--cache_dir" => cache_dir = Some(PathBuf::from(value)),
            _ => return Err(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    Ok(Args {
        request: GenerationRequest::new(master_seed, content_type, density, chunk_coords)
            .with_format(output_format),
        cache_dir,
    })
}

fn main() {
    chunkforge::core::logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let pipeline = GenerationPipeline::default();
    let result = match args.cache_dir {
        Some(dir) => {
            let store = DiskChunkStore::new(dir);
            log::info!("Using chunk cache at {}", store.base_dir().display());
            CachedGenerator::new(pipeline, store)
                .and_then(|mut cached| cached.run(&args.request))
        }
        None => Ok(pipeline.run(&args.request)),
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error generating chunk: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding result: {}", e);
            std::process::exit(1);
        }
    }
}
