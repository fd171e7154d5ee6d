//! Domain errors for the Atrium content system.

use thiserror::Error;

/// Domain-level errors that can occur in the Atrium system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Invalid content identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Unknown content kind: {0:?}")]
    UnknownContentKind(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
