//! In-memory implementation of the StorageBackend trait.
//!
//! Used by unit and integration tests where a real RocksDB instance would be
//! overkill. Batches are applied under a single write lock, matching the
//! all-or-nothing contract.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type Keyspace = BTreeMap<Vec<u8>, Vec<u8>>;

/// HashMap-backed storage, one keyspace per partition.
#[derive(Default)]
pub struct MemoryBackend {
    partitions: RwLock<HashMap<String, Keyspace>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let guard = self
            .partitions
            .read()
            .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
        let keyspace = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        Ok(keyspace.get(key).cloned())
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
        let keyspace = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        keyspace.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
        let keyspace = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        keyspace.remove(key);
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;

        // Validate every partition before touching anything so a bad
        // operation cannot leave a half-applied batch behind.
        for op in &operations {
            let name = match op {
                Operation::Put { partition, .. } => partition.name(),
                Operation::Delete { partition, .. } => partition.name(),
            };
            if !guard.contains_key(name) {
                return Err(StorageError::PartitionNotFound(name.to_string()));
            }
        }

        for op in operations {
            match op {
                Operation::Put {
                    partition,
                    key,
                    value,
                } => {
                    guard
                        .get_mut(partition.name())
                        .expect("partition checked above")
                        .insert(key, value);
                }
                Operation::Delete { partition, key } => {
                    guard
                        .get_mut(partition.name())
                        .expect("partition checked above")
                        .remove(&key);
                }
            }
        }

        Ok(())
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.partitions
            .read()
            .map(|guard| guard.contains_key(partition.name()))
            .unwrap_or(false)
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
        guard.entry(partition.name().to_string()).or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with_partition(name: &str) -> (MemoryBackend, Partition) {
        let backend = MemoryBackend::new();
        let partition = Partition::new(name);
        backend.create_partition(&partition).unwrap();
        (backend, partition)
    }

    #[test]
    fn put_get_delete_round_trip() {
        let (backend, partition) = backend_with_partition("entities");

        backend.put(&partition, b"k1", b"v1").unwrap();
        assert_eq!(backend.get(&partition, b"k1").unwrap(), Some(b"v1".to_vec()));
        assert!(backend.contains(&partition, b"k1").unwrap());

        backend.delete(&partition, b"k1").unwrap();
        assert_eq!(backend.get(&partition, b"k1").unwrap(), None);
        assert!(!backend.contains(&partition, b"k1").unwrap());
    }

    #[test]
    fn unknown_partition_rejected() {
        let backend = MemoryBackend::new();
        let err = backend.get(&Partition::new("ghost"), b"k").unwrap_err();
        assert!(matches!(err, StorageError::PartitionNotFound(_)));
    }

    #[test]
    fn batch_rejects_unknown_partition_without_side_effects() {
        let (backend, partition) = backend_with_partition("entities");

        let err = backend
            .batch(vec![
                Operation::Put {
                    partition: partition.clone(),
                    key: b"a".to_vec(),
                    value: b"1".to_vec(),
                },
                Operation::Put {
                    partition: Partition::new("ghost"),
                    key: b"b".to_vec(),
                    value: b"2".to_vec(),
                },
            ])
            .unwrap_err();

        assert!(matches!(err, StorageError::PartitionNotFound(_)));
        // First op must not have been applied
        assert_eq!(backend.get(&partition, b"a").unwrap(), None);
    }

    #[test]
    fn batch_put_and_delete() {
        let (backend, partition) = backend_with_partition("entities");
        backend.put(&partition, b"stale", b"x").unwrap();

        backend
            .batch(vec![
                Operation::Put {
                    partition: partition.clone(),
                    key: b"fresh".to_vec(),
                    value: b"y".to_vec(),
                },
                Operation::Delete {
                    partition: partition.clone(),
                    key: b"stale".to_vec(),
                },
            ])
            .unwrap();

        assert_eq!(backend.get(&partition, b"stale").unwrap(), None);
        assert_eq!(
            backend.get(&partition, b"fresh").unwrap(),
            Some(b"y".to_vec())
        );
    }
}
