//! # frontdesk-store
//!
//! Key-value storage abstraction for the Frontdesk server. This crate
//! isolates all direct RocksDB interaction so the entity layer in
//! `frontdesk-core` stays free of storage-engine dependencies.
//!
//! ## Architecture
//!
//! ```text
//! frontdesk-core (indexed entity stores)
//!     ↓
//! frontdesk-store (K/V operations)
//!     ↓
//! RocksDB / in-memory backend
//! ```

pub mod memory;
pub mod rocksdb_impl;
pub mod storage_trait;

pub use memory::MemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
