//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A precondition on caller-supplied data was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// Externally authored content could not be parsed.
    #[error("content error: {0}")]
    Content(String),

    /// An infrastructure/I/O error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
