//! Chunkforge - deterministic layered procedural content generation
//!
//! A chunk's content (points, skeleton, skinned mesh, textures, rig, clips and
//! scene placement) is a pure function of a master seed, the chunk coordinates,
//! the content type and the density.

pub mod core;
pub mod math;
pub mod generation;
pub mod animation;
pub mod mesh;
pub mod asset;
pub mod scene;
pub mod streaming;

pub use generation::{run_pipeline, GeneratedChunk, GenerationPipeline, PipelineResult};
