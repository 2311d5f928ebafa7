use thiserror::Error;

use crate::movie::DecodeFault;

/// Faults reported by a store connection, before any interpretation.
///
/// Whether a failed condition means "already exists" or "not found" depends
/// on the request that carried it, so that decision is left to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("The conditional request failed")]
    ConditionalCheckFailed,
    #[error("Resource in use: {0}")]
    ResourceInUse(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Decoding error: {0}")]
    Decoding(DecodeFault),
}

impl RepositoryError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Transport(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// A batch load that stopped at its first failing record.
///
/// The first `committed` records were written; none after the failing one
/// were attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Batch insert stopped after {committed} records: {source}")]
pub struct BatchInsertError {
    pub committed: usize,
    #[source]
    pub source: RepositoryError,
}
