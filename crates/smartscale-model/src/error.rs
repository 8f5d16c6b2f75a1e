//! Error types for model training, persistence, and inference.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while training, persisting, or applying the
/// forecast model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("artifact io: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model fit failed: {0}")]
    Fit(String),

    #[error("feature shape mismatch: model expects {expected}, got {got}")]
    Shape { expected: usize, got: usize },
}
