//! Error types for the architect.

use thiserror::Error;

/// Architect errors.
#[derive(Debug, Error)]
pub enum ArchitectError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a request is already in flight")]
    Busy,

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("unknown build style: {0}")]
    UnknownStyle(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response has no text")]
    EmptyResponse,

    #[error("response is not a command list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for architect operations.
pub type Result<T> = std::result::Result<T, ArchitectError>;
