//! Error types shared across Voxcraft crates.

use thiserror::Error;

/// Voxcraft-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A block tag outside the registry
    #[error("Unknown block type: {0:?}")]
    UnknownBlockType(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
