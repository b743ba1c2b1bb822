//! Error types for the persistence layer.

use thiserror::Error;

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors that can occur in persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A mutation was attempted before the durable snapshot was loaded.
    #[error("store is not hydrated yet")]
    NotHydrated,
}
