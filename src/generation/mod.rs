//! Layered chunk generation pipeline.
//!
//! The pipeline runs six layers strictly in order, each seeded independently
//! from the master seed and chunk coordinates:
//! 0. Configuration and layer seeds ([`config`], [`seed`])
//! 1. Spatial distribution ([`spatial`])
//! 2. Skeleton topology ([`crate::animation::skeleton`])
//! 3. Tube mesh geometry ([`crate::mesh::tube`])
//! 4. Textures, rig and animation clips ([`crate::asset`])
//! 5. World integration ([`world`])

pub mod cached;
pub mod config;
pub mod rng;
pub mod seed;
pub mod spatial;
pub mod world;

pub use cached::CachedGenerator;
pub use config::{ChunkCoord, ContentType, ExportFormat, GenerationConfig, GenerationParams, GenerationRequest};
pub use rng::SeededRng;
pub use seed::{derive_layer_seed, LayerId, LayerSeeds};
pub use spatial::{distribute_points, Point, SpatialParams};
pub use world::{integrate_world, ExportManifest, WorldIntegration, WorldParams};

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::skeleton::{build_skeleton, Skeleton};
use crate::asset::{generate_assets, AssetBundle};
use crate::core::Result;
use crate::mesh::{extrude_skeleton, Mesh};
use crate::streaming::key::params_hash;

/// Full output of every layer for one chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedChunk {
    pub config: GenerationConfig,
    pub output_format: ExportFormat,
    pub points: Vec<Point>,
    pub skeleton: Skeleton,
    pub mesh: Mesh,
    pub assets: AssetBundle,
    pub world: WorldIntegration,
}

impl GeneratedChunk {
    /// Count summary of this chunk.
    pub fn summary(&self) -> PipelineResult {
        PipelineResult {
            config: self.config.clone(),
            points: self.points.len(),
            skeleton: SkeletonSummary {
                joints: self.skeleton.joint_count(),
                bones: self.skeleton.bone_count(),
            },
            mesh: MeshSummary {
                vertices: self.mesh.vertex_count(),
                triangles: self.mesh.triangle_count(),
            },
            assets: AssetSummary {
                textures: self.assets.texture_count(),
                rig_joints: self.assets.rig.joint_count,
                animations: self.assets.animation_count(),
            },
            scene: SceneSummary {
                nodes: self.world.scene.node_count(),
                interaction_zones: self.world.interaction_zones.len(),
                export_format: self.world.export_manifest.format,
            },
            output_format: self.output_format,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonSummary {
    pub joints: usize,
    pub bones: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub textures: usize,
    pub rig_joints: usize,
    pub animations: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSummary {
    pub nodes: usize,
    pub interaction_zones: usize,
    pub export_format: ExportFormat,
}

/// Result record of one pipeline run: the configuration plus per-layer counts.
///
/// This is also the payload stored by the chunk cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub config: GenerationConfig,
    pub points: usize,
    pub skeleton: SkeletonSummary,
    pub mesh: MeshSummary,
    pub assets: AssetSummary,
    pub scene: SceneSummary,
    pub output_format: ExportFormat,
}

/// Orchestrates chunk generation: seeds → points → skeleton → mesh → assets → world.
#[derive(Clone, Debug, Default)]
pub struct GenerationPipeline {
    params: GenerationParams,
}

impl GenerationPipeline {
    pub fn new(params: GenerationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Hash of the parameter set, as mixed into cache keys
    pub fn params_hash(&self) -> Result<String> {
        params_hash(&self.params)
    }

    /// Run every layer for one chunk.
    pub fn generate(&self, config: &GenerationConfig, output_format: ExportFormat) -> GeneratedChunk {
        let start = Instant::now();
        log::info!(
            "=== Generation pipeline: seed={} type={} chunk={} ===",
            config.master_seed,
            config.content_type,
            config.chunk_coords
        );
        if let Ok(json) = serde_json::to_string(config) {
            log::debug!("[Layer 0] Configuration: {}", json);
        }

        let params = &self.params;
        let points = distribute_points(config, &params.spatial);
        let skeleton = build_skeleton(config, &points, &params.topology);
        let mesh = extrude_skeleton(config, &skeleton, &params.mesh);
        let assets = generate_assets(config, &skeleton, &params.assets, &params.animation);
        let world = integrate_world(
            config,
            &mesh,
            &assets,
            skeleton.joint_count(),
            output_format,
            &params.world,
        );

        log::info!("=== Pipeline complete in {:.2?} ===", start.elapsed());

        GeneratedChunk {
            config: config.clone(),
            output_format,
            points,
            skeleton,
            mesh,
            assets,
            world,
        }
    }

    /// Run the pipeline for a request and summarize it.
    pub fn run(&self, request: &GenerationRequest) -> PipelineResult {
        self.generate(&request.config(), request.output_format).summary()
    }

    /// Generate independent chunks in parallel. Output order matches `requests`.
    pub fn generate_batch(&self, requests: &[GenerationRequest]) -> Vec<GeneratedChunk> {
        let start = Instant::now();
        let chunks: Vec<GeneratedChunk> = requests
            .par_iter()
            .map(|request| self.generate(&request.config(), request.output_format))
            .collect();

        let elapsed = start.elapsed();
        log::info!(
            "Generated {} chunks in {:.1}s ({:.0} chunks/sec)",
            chunks.len(),
            elapsed.as_secs_f64(),
            chunks.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
        chunks
    }
}

/// Run the full pipeline with default parameters.
///
/// Fails only when `output_format` is not a known export format.
pub fn run_pipeline(
    master_seed: u64,
    content_type: &str,
    density: f64,
    chunk_coords: (i32, i32, i32),
    output_format: &str,
) -> Result<PipelineResult> {
    let (x, y, z) = chunk_coords;
    let request = GenerationRequest::new(
        master_seed,
        ContentType::parse(content_type),
        density,
        ChunkCoord::new(x, y, z),
    )
    .with_format(output_format.parse()?);
    Ok(GenerationPipeline::default().run(&request))
}
