//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while serialising or loading a knowledge base.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record references an identifier the document never defines.
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// A fact record violates its relation's schema.
    #[error("Validation error: {0}")]
    Validation(String),
}
