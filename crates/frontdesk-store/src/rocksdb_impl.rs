//! RocksDB implementation of the StorageBackend trait.
//!
//! Maps partitions to RocksDB column families. Uses the multi-threaded DB
//! mode so column families can be created at runtime without exclusive
//! access to the handle.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use rocksdb::{BoundColumnFamily, DBWithThreadMode, MultiThreaded, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

type Db = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed storage with one column family per partition.
pub struct RocksDbBackend {
    db: Arc<Db>,
}

impl RocksDbBackend {
    /// Opens (or creates) a database at `path`, reattaching any column
    /// families that exist from a previous run.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let existing = Db::list_cf(&opts, path.as_ref()).unwrap_or_default();
        let cf_names: Vec<String> = if existing.is_empty() {
            vec!["default".to_string()]
        } else {
            existing
        };

        let db = Db::open_cf(&opts, path.as_ref(), cf_names)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, partition: &Partition) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(partition)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut batch = WriteBatch::default();

        for op in operations {
            match op {
                Operation::Put {
                    partition,
                    key,
                    value,
                } => {
                    let cf = self.cf(&partition)?;
                    batch.put_cf(&cf, key, value);
                }
                Operation::Delete { partition, key } => {
                    let cf = self.cf(&partition)?;
                    batch.delete_cf(&cf, key);
                }
            }
        }

        self.db
            .write(batch)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        if self.partition_exists(partition) {
            return Ok(());
        }

        let opts = Options::default();
        match self.db.create_cf(partition.name(), &opts) {
            Ok(()) => Ok(()),
            Err(e) => {
                // Benign race: another thread created the CF between the
                // exists-check and create.
                let msg = e.to_string();
                if msg.to_lowercase().contains("column family already exists") {
                    log::warn!("partition {} already created concurrently", partition.name());
                    Ok(())
                } else {
                    Err(StorageError::Io(msg))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_test_backend() -> (RocksDbBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = RocksDbBackend::open(temp_dir.path()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn create_and_check_partition() {
        let (backend, _temp) = open_test_backend();

        let partition = Partition::new("entities");
        backend.create_partition(&partition).unwrap();
        assert!(backend.partition_exists(&partition));

        // Idempotent
        backend.create_partition(&partition).unwrap();
    }

    #[test]
    fn concurrent_partition_creation_succeeds() {
        let (backend, _temp) = open_test_backend();
        let backend = std::sync::Arc::new(backend);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let backend = backend.clone();
                std::thread::spawn(move || backend.create_partition(&Partition::new("entities")))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert!(backend.partition_exists(&Partition::new("entities")));
    }

    #[test]
    fn put_get_delete() {
        let (backend, _temp) = open_test_backend();

        let partition = Partition::new("entities");
        backend.create_partition(&partition).unwrap();

        backend.put(&partition, b"seminar:s1", b"v1").unwrap();
        assert_eq!(
            backend.get(&partition, b"seminar:s1").unwrap(),
            Some(b"v1".to_vec())
        );
        assert!(backend.contains(&partition, b"seminar:s1").unwrap());

        backend.delete(&partition, b"seminar:s1").unwrap();
        assert_eq!(backend.get(&partition, b"seminar:s1").unwrap(), None);

        // Deleting an absent key is fine
        backend.delete(&partition, b"seminar:s1").unwrap();
    }

    #[test]
    fn missing_partition_is_an_error() {
        let (backend, _temp) = open_test_backend();

        let err = backend.get(&Partition::new("nope"), b"k").unwrap_err();
        assert!(matches!(err, StorageError::PartitionNotFound(_)));
    }

    #[test]
    fn batch_is_applied_together() {
        let (backend, _temp) = open_test_backend();

        let partition = Partition::new("entities");
        backend.create_partition(&partition).unwrap();
        backend.put(&partition, b"old", b"x").unwrap();

        backend
            .batch(vec![
                Operation::Put {
                    partition: partition.clone(),
                    key: b"a".to_vec(),
                    value: b"1".to_vec(),
                },
                Operation::Put {
                    partition: partition.clone(),
                    key: b"b".to_vec(),
                    value: b"2".to_vec(),
                },
                Operation::Delete {
                    partition: partition.clone(),
                    key: b"old".to_vec(),
                },
            ])
            .unwrap();

        assert_eq!(backend.get(&partition, b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(backend.get(&partition, b"b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(backend.get(&partition, b"old").unwrap(), None);
    }

    #[test]
    fn reopen_preserves_partitions_and_data() {
        let temp_dir = TempDir::new().unwrap();

        {
            let backend = RocksDbBackend::open(temp_dir.path()).unwrap();
            let partition = Partition::new("entities");
            backend.create_partition(&partition).unwrap();
            backend.put(&partition, b"k", b"v").unwrap();
        }

        let backend = RocksDbBackend::open(temp_dir.path()).unwrap();
        let partition = Partition::new("entities");
        assert!(backend.partition_exists(&partition));
        assert_eq!(backend.get(&partition, b"k").unwrap(), Some(b"v".to_vec()));
    }
}
