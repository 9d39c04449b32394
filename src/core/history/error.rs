//! Error types for the history store.

use thiserror::Error;

/// History store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry with the given id (in the given category).
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entry rejected before reaching the database.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

impl StoreError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type alias for history store operations.
pub type StoreResult<T> = Result<T, StoreError>;
