//! Pipeline runs backed by a chunk store.
//!
//! The store is consulted once before a run and written once after it; the
//! layers themselves never touch it.

use crate::core::Result;
use crate::streaming::cache::ChunkStore;
use crate::streaming::key::{compute_cache_key, GENERATION_VERSION};
use super::config::GenerationRequest;
use super::{GenerationPipeline, PipelineResult};

/// Looks results up by cache key and generates only on a miss.
pub struct CachedGenerator<S: ChunkStore> {
    pipeline: GenerationPipeline,
    store: S,
    params_hash: String,
}

impl<S: ChunkStore> CachedGenerator<S> {
    /// Fails only if the pipeline parameters cannot be serialized for hashing.
    pub fn new(pipeline: GenerationPipeline, store: S) -> Result<Self> {
        let params_hash = pipeline.params_hash()?;
        Ok(Self {
            pipeline,
            store,
            params_hash,
        })
    }

    pub fn pipeline(&self) -> &GenerationPipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Cache key of `request` under the current version and parameters.
    ///
    /// The export format is not part of the key.
    pub fn cache_key(&self, request: &GenerationRequest) -> String {
        compute_cache_key(
            request.master_seed,
            request.chunk_coords,
            GENERATION_VERSION,
            &request.content_type,
            &self.params_hash,
        )
    }

    /// Return the cached result for `request`, generating and storing it on a miss.
    ///
    /// A hit reports the requested export format, whichever format the entry was
    /// stored with. Unreadable payloads are treated as misses and overwritten.
    pub fn run(&mut self, request: &GenerationRequest) -> Result<PipelineResult> {
        let key = self.cache_key(request);
        if let Some(payload) = self.store.get(&key)? {
            match serde_json::from_str::<PipelineResult>(&payload) {
                Ok(mut result) => {
                    log::debug!("Cache hit for chunk {} ({})", request.chunk_coords, key);
                    result.output_format = request.output_format;
                    result.scene.export_format = request.output_format;
                    return Ok(result);
                }
                Err(e) => log::warn!("Discarding unreadable cache entry {}: {}", key, e),
            }
        }

        log::debug!("Cache miss for chunk {} ({})", request.chunk_coords, key);
        let result = self.pipeline.run(request);
        self.store.put(&key, &serde_json::to_string_pretty(&result)?)?;
        Ok(result)
    }

    /// Drop every cached entry, returning how many were removed
    pub fn clear(&mut self) -> Result<usize> {
        self.store.clear()
    }
}
