//! # frontdesk-api
//!
//! HTTP route layer for the Frontdesk server. Handlers parse and validate
//! request bodies, call into the entity stores from `frontdesk-core`, and
//! wrap every result in the uniform `{success, data, error}` envelope.

pub mod handlers;
pub mod models;
pub mod routes;

pub use models::ApiResponse;
pub use routes::configure_routes;
