//! # frontdesk-core
//!
//! Indexed entity storage for the Frontdesk server. The central piece is
//! [`entity::EntityStore`], a generic typed record store built on the
//! key-value backend from `frontdesk-store`. Each entity type keeps a
//! secondary index of all its record IDs so listing never scans the
//! keyspace, and every write that touches both the record and the index
//! goes through one atomic batch.

pub mod context;
pub mod entity;
pub mod error;
pub mod models;
pub mod seed;

pub use context::AppContext;
pub use entity::{EntityConfig, EntityStore, Record};
pub use error::{EntityError, Result};
pub use models::{Attendee, AttendeePatch, Seminar, SeminarPatch};
