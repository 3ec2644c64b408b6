//! Chunk caching and level-of-detail tables

pub mod cache;
pub mod disk_io;
pub mod key;
pub mod lod;

pub use cache::{ChunkStore, MemoryChunkStore};
pub use disk_io::DiskChunkStore;
pub use key::{compute_cache_key, params_hash, GENERATION_VERSION};
pub use lod::{LodLevel, LodTable};
