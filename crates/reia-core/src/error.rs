//! Centralized error types for REIA.

use thiserror::Error;

/// Main error type for REIA operations.
#[derive(Error, Debug)]
pub enum ReiaError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for REIA operations.
pub type ReiaResult<T> = Result<T, ReiaError>;

impl ReiaError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

/// Check that a listing link is non-empty after trimming.
///
/// The only validation the submission flow performs; the link is otherwise
/// forwarded as typed.
pub fn validate_link(link: &str) -> ReiaResult<()> {
    if link.trim().is_empty() {
        return Err(ReiaError::validation("listing URL must not be empty"));
    }
    Ok(())
}
