//! Generic indexed entity store.
//!
//! `EntityStore<T>` persists typed records under string keys and maintains a
//! secondary index of all record IDs for its entity type. The index is one
//! KV entry (a JSON array of IDs in insertion order) stored under the
//! configured index name; each record lives under `"<entity_name>:<id>"`.
//! Both live in the shared `entities` partition.
//!
//! ## Invariant
//!
//! The index always equals the set of IDs with a backing record: no orphan
//! index entries, no un-indexed records. Every write that changes both the
//! record set and the index is submitted as one atomic batch, so a crash
//! between the two keys cannot split them.
//!
//! ## Concurrency
//!
//! Two concurrent creates for the same entity type race on the index
//! read-modify-write and one appended ID can be lost. Requests are handled
//! independently and no cross-request coordination happens at this layer.

use crate::error::{EntityError, Result};
use frontdesk_store::{Operation, Partition, StorageBackend};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Partition holding every entity record and index entry.
pub const ENTITY_PARTITION: &str = "entities";

/// A typed record persisted by an [`EntityStore`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Partial-update shape: fields left `None` are untouched.
    type Patch;

    /// Unique ID within the entity type.
    fn id(&self) -> &str;

    /// Shallow merge of the patch into this record.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Static configuration for one entity type.
///
/// Passed to [`EntityStore::new`] instead of being declared by a subclass:
/// the store is generic, the entity types are plain data.
pub struct EntityConfig<T> {
    /// Namespaces record keys: `"<entity_name>:<id>"`
    pub entity_name: &'static str,
    /// Key of the index entry holding all IDs for this type
    pub index_name: &'static str,
    /// Zero value returned by `get_state` for a never-created ID
    pub initial_state: T,
    /// Records written once, the first time the index is found absent
    pub seed_data: Vec<T>,
}

/// Generic CRUD + index maintenance for one entity type.
pub struct EntityStore<T: Record> {
    backend: Arc<dyn StorageBackend>,
    partition: Partition,
    config: EntityConfig<T>,
}

impl<T: Record> EntityStore<T> {
    pub fn new(backend: Arc<dyn StorageBackend>, config: EntityConfig<T>) -> Self {
        Self {
            backend,
            partition: Partition::new(ENTITY_PARTITION),
            config,
        }
    }

    pub fn entity_name(&self) -> &'static str {
        self.config.entity_name
    }

    fn record_key(&self, id: &str) -> Vec<u8> {
        format!("{}:{}", self.config.entity_name, id).into_bytes()
    }

    fn index_key(&self) -> &[u8] {
        self.config.index_name.as_bytes()
    }

    /// Reads the index entry. `None` means the index was never initialized
    /// (seeding has not happened yet).
    fn read_index(&self) -> Result<Option<Vec<String>>> {
        match self.backend.get(&self.partition, self.index_key())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn index_put_op(&self, ids: &[String]) -> Result<Operation> {
        Ok(Operation::Put {
            partition: self.partition.clone(),
            key: self.index_key().to_vec(),
            value: serde_json::to_vec(ids)?,
        })
    }

    fn record_put_op(&self, record: &T) -> Result<Operation> {
        Ok(Operation::Put {
            partition: self.partition.clone(),
            key: self.record_key(record.id()),
            value: serde_json::to_vec(record)?,
        })
    }

    fn read_record(&self, id: &str) -> Result<Option<T>> {
        match self.backend.get(&self.partition, &self.record_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Idempotently ensures the index exists, seeding it on first use.
    ///
    /// When the index entry is absent, every seed record plus the index
    /// listing the seed IDs is written in one atomic batch. When it already
    /// exists this is a single read and a no-op — never a re-seed. Returns
    /// whether seeding happened.
    pub fn ensure_seed(&self) -> Result<bool> {
        if self.backend.contains(&self.partition, self.index_key())? {
            return Ok(false);
        }

        let ids: Vec<String> = self
            .config
            .seed_data
            .iter()
            .map(|r| r.id().to_string())
            .collect();

        let mut ops = Vec::with_capacity(self.config.seed_data.len() + 1);
        for record in &self.config.seed_data {
            ops.push(self.record_put_op(record)?);
        }
        ops.push(self.index_put_op(&ids)?);
        self.backend.batch(ops)?;

        log::info!(
            "Seeded {} '{}' record(s) into index '{}'",
            ids.len(),
            self.config.entity_name,
            self.config.index_name
        );
        Ok(true)
    }

    /// Returns all records in index order (insertion order).
    ///
    /// An index entry whose backing record is missing signals an
    /// index/record desync; it is skipped with a warning so reads stay
    /// available while the bug is investigated.
    pub fn list(&self) -> Result<Vec<T>> {
        let ids = self.read_index()?.unwrap_or_default();

        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.read_record(id)? {
                Some(record) => records.push(record),
                None => {
                    log::warn!(
                        "Index '{}' references missing record '{}:{}'; skipping",
                        self.config.index_name,
                        self.config.entity_name,
                        id
                    );
                }
            }
        }
        Ok(records)
    }

    /// Persists a fully-formed record and appends its ID to the index.
    ///
    /// Rejects with [`EntityError::DuplicateKey`] when the ID is already
    /// indexed; overwrite semantics are never relied on.
    pub fn create(&self, record: T) -> Result<T> {
        let mut ids = self.read_index()?.unwrap_or_default();
        if ids.iter().any(|id| id == record.id()) {
            return Err(EntityError::DuplicateKey(format!(
                "{} '{}' already exists",
                self.config.entity_name,
                record.id()
            )));
        }
        ids.push(record.id().to_string());

        self.backend
            .batch(vec![self.record_put_op(&record)?, self.index_put_op(&ids)?])?;
        Ok(record)
    }

    /// Merges the patch into the existing record (shallow merge).
    ///
    /// Fails with [`EntityError::NotFound`] when the record is absent. Only
    /// the record key changes; the index is untouched.
    pub fn patch(&self, id: &str, patch: T::Patch) -> Result<T> {
        let mut record = self
            .read_record(id)?
            .ok_or_else(|| self.not_found(id))?;
        record.apply_patch(patch);
        self.backend
            .put(&self.partition, &self.record_key(id), &serde_json::to_vec(&record)?)?;
        Ok(record)
    }

    /// Read-modify-write with a pure transform.
    ///
    /// Used for derived-field updates where the new value depends on the
    /// prior one. Touches only the record key, so no index change is needed.
    pub fn mutate<F>(&self, id: &str, transform: F) -> Result<T>
    where
        F: FnOnce(T) -> T,
    {
        let record = self
            .read_record(id)?
            .ok_or_else(|| self.not_found(id))?;
        let updated = transform(record);
        self.backend.put(
            &self.partition,
            &self.record_key(id),
            &serde_json::to_vec(&updated)?,
        )?;
        Ok(updated)
    }

    /// Removes the record and its index entry atomically.
    ///
    /// Returns `false` when the ID was not indexed, so callers can tell
    /// "already absent" from "removed".
    pub fn delete(&self, id: &str) -> Result<bool> {
        let Some(mut ids) = self.read_index()? else {
            return Ok(false);
        };
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }

        self.backend.batch(vec![
            Operation::Delete {
                partition: self.partition.clone(),
                key: self.record_key(id),
            },
            self.index_put_op(&ids)?,
        ])?;
        Ok(true)
    }

    /// Removes a batch of records in one atomic write.
    ///
    /// Returns the IDs that were actually removed; IDs not present in the
    /// index are ignored.
    pub fn delete_many(&self, ids: &[String]) -> Result<Vec<String>> {
        let Some(indexed) = self.read_index()? else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<String>, Vec<String>) = indexed
            .into_iter()
            .partition(|existing| ids.contains(existing));
        if removed.is_empty() {
            return Ok(removed);
        }

        let mut ops: Vec<Operation> = removed
            .iter()
            .map(|id| Operation::Delete {
                partition: self.partition.clone(),
                key: self.record_key(id),
            })
            .collect();
        ops.push(self.index_put_op(&kept)?);
        self.backend.batch(ops)?;
        Ok(removed)
    }

    /// O(1) existence check against the record key.
    pub fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.backend.contains(&self.partition, &self.record_key(id))?)
    }

    /// Returns the current record, or the entity's zero value when never
    /// created. Reads never fail for a missing record.
    pub fn get_state(&self, id: &str) -> Result<T> {
        Ok(self
            .read_record(id)?
            .unwrap_or_else(|| self.config.initial_state.clone()))
    }

    fn not_found(&self, id: &str) -> EntityError {
        EntityError::NotFound(format!("{} '{}' not found", self.config.entity_name, id))
    }
}
