//! Storage error types.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend failure (connection loss, I/O error, ...).
    ///
    /// The in-memory backend never produces this; database-backed
    /// implementations surface their driver errors through it.
    #[error("Storage backend failure: {0}")]
    Backend(String),

    /// Unique-constraint violation, such as inserting a user with a
    /// national number that is already registered.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
