//! Error types for chunk generation and caching

use thiserror::Error;

/// Main error type for the crate
///
/// The generation layers never fail; errors come from the cache collaborators,
/// payload (de)serialization and argument parsing around the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Invalid layer seeds: {0}")]
    InvalidLayerSeeds(String),
}
