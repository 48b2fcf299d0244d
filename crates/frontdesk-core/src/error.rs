use frontdesk_store::StorageError;
use thiserror::Error;

/// Errors surfaced by entity store operations.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Mutating operation on an ID that is not present
    #[error("not found: {0}")]
    NotFound(String),

    /// Create with an ID that is already indexed
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Underlying storage failure; never retried here
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record or index entry could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for entity operations.
pub type Result<T> = std::result::Result<T, EntityError>;

impl From<serde_json::Error> for EntityError {
    fn from(err: serde_json::Error) -> Self {
        EntityError::Serialization(err.to_string())
    }
}
