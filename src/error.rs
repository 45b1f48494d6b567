//! Error types for the financial advisor

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Core Pipeline Errors
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Model is still loading: {0}")]
    ModelLoading(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown session: {0}")]
    UnknownSession(uuid::Uuid),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("UUID parse error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
