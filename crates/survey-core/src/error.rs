//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A requested entity (group, respondent) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller-supplied input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The static survey configuration is inconsistent. Never recoverable
    /// per request: the same configuration fails the same way every time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The caller did not present the shared admin credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
