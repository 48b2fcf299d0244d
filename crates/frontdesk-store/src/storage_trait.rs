//! Storage backend abstraction for pluggable storage implementations.
//!
//! The entity layer only needs a small durable mapping from bytes to bytes:
//! get/put/delete, an existence check, and an atomic multi-operation batch.
//! Backends map the generic [`Partition`] concept to their native namespace
//! (RocksDB: column family, in-memory: map).

use std::fmt;
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors surfaced by storage backends.
///
/// Callers treat every variant as "storage unavailable": nothing here is
/// retried internally.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Partition (column family, namespace) not found
    #[error("partition not found: {0}")]
    PartitionNotFound(String),

    /// Generic I/O error from the underlying storage engine
    #[error("I/O error: {0}")]
    Io(String),

    /// Other errors
    #[error("storage error: {0}")]
    Other(String),
}

/// A named namespace of keys within a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    name: String,
}

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Partition {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A single operation within an atomic batch.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Insert or update a key-value pair
    Put {
        partition: Partition,
        key: Vec<u8>,
        value: Vec<u8>,
    },

    /// Delete a key
    Delete { partition: Partition, key: Vec<u8> },
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (`Send + Sync`). `batch` must be
/// all-or-nothing: either every operation is applied or none are. The entity
/// layer relies on this to keep a record and its index entry moving together.
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key. Returns `Ok(None)` when the key is absent.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores a key-value pair, overwriting any existing value.
    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes a key. Idempotent: deleting an absent key is `Ok(())`.
    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Checks whether a key exists.
    fn contains(&self, partition: &Partition, key: &[u8]) -> Result<bool> {
        Ok(self.get(partition, key)?.is_some())
    }

    /// Applies multiple operations atomically.
    fn batch(&self, operations: Vec<Operation>) -> Result<()>;

    /// Checks if a partition exists.
    fn partition_exists(&self, partition: &Partition) -> bool;

    /// Creates a partition. Idempotent when it already exists.
    fn create_partition(&self, partition: &Partition) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_name_round_trip() {
        let p = Partition::new("entities");
        assert_eq!(p.name(), "entities");
        assert_eq!(Partition::from("seminars").name(), "seminars");
    }

    #[test]
    fn error_display() {
        let err = StorageError::PartitionNotFound("entities".to_string());
        assert_eq!(err.to_string(), "partition not found: entities");

        let err = StorageError::Io("disk full".to_string());
        assert_eq!(err.to_string(), "I/O error: disk full");
    }
}
