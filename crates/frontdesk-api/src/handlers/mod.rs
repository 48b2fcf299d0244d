//! HTTP handlers plus the shared response/error helpers they use.

pub mod attendees;
pub mod health;
pub mod seminars;

use crate::models::ApiResponse;
use actix_web::{web, HttpResponse};
use frontdesk_core::{EntityError, Result as EntityResult};
use serde::Serialize;
use serde_json::Value;

pub use attendees::*;
pub use health::*;
pub use seminars::*;

/// 200 with `{success: true, data}`.
pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

/// 400 with `{success: false, error}`.
pub(crate) fn bad(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<Value>::err(message))
}

/// 404 with `{success: false, error}`.
pub(crate) fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<Value>::err(message))
}

/// Maps an entity-layer failure to its HTTP status inside the envelope.
pub(crate) fn entity_error(err: EntityError) -> HttpResponse {
    match err {
        EntityError::NotFound(msg) => not_found(&msg),
        EntityError::DuplicateKey(msg) => {
            HttpResponse::Conflict().json(ApiResponse::<Value>::err(msg))
        }
        other => {
            log::error!("Storage failure while handling request: {}", other);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<Value>::err("internal storage error"))
        }
    }
}

/// Runs a synchronous storage operation on the blocking thread pool.
///
/// Storage calls go through RocksDB and must not run on the async workers.
pub(crate) async fn run_blocking<T, F>(f: F) -> EntityResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> EntityResult<T> + Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| {
            EntityError::Storage(frontdesk_store::StorageError::Other(format!(
                "blocking task failed: {e}"
            )))
        })?
}

/// Required-string check used by the route validators.
pub(crate) fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
