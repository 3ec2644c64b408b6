use criterion::{criterion_group, criterion_main, Criterion, black_box};

use chunkforge::animation::skeleton::{build_skeleton, TopologyParams};
use chunkforge::generation::{
    distribute_points, ChunkCoord, ContentType, ExportFormat, GenerationConfig, GenerationPipeline,
    GenerationRequest, SpatialParams,
};
use chunkforge::streaming::key::params_hash;

fn creature_config(density: f64) -> GenerationConfig {
    GenerationConfig::new(42, ContentType::Creature, density, ChunkCoord::default())
}

fn bench_full_pipeline(c: &mut Criterion) {
    let pipeline = GenerationPipeline::default();
    let config = creature_config(0.75);

    c.bench_function("pipeline_creature_0_75", |b| {
        b.iter(|| pipeline.generate(black_box(&config), ExportFormat::Fbx));
    });
}

fn bench_skeleton_full_density(c: &mut Criterion) {
    let config = creature_config(1.0);
    let points = distribute_points(&config, &SpatialParams::default());
    let params = TopologyParams::default();

    c.bench_function("skeleton_256_points", |b| {
        b.iter(|| build_skeleton(black_box(&config), black_box(&points), &params));
    });
}

fn bench_batch_16(c: &mut Criterion) {
    let pipeline = GenerationPipeline::default();
    let requests: Vec<GenerationRequest> = (0..16)
        .map(|i| GenerationRequest::new(7, ContentType::Mineral, 0.5, ChunkCoord::new(i % 4, i / 4, 0)))
        .collect();

    c.bench_function("pipeline_batch_16", |b| {
        b.iter(|| pipeline.generate_batch(black_box(&requests)));
    });
}

fn bench_params_hash(c: &mut Criterion) {
    let pipeline = GenerationPipeline::default();

    c.bench_function("params_hash", |b| {
        b.iter(|| params_hash(black_box(pipeline.params())));
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_skeleton_full_density,
    bench_batch_16,
    bench_params_hash,
);
criterion_main!(benches);
