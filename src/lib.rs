//! Frontdesk server library surface.
//!
//! The binary in `main.rs` stays a thin orchestrator; configuration and
//! middleware construction live here so integration tests can reuse them.

pub mod config;
pub mod middleware;
