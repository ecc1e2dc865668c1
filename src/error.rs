//! Error types for model configuration and persistence

use thiserror::Error;

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// A parameter value could not be parsed or violates its constraint
    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    /// A snapshot is missing a required section
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn invalid(name: &str, value: &str, reason: impl Into<String>) -> Self {
        ModelError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
