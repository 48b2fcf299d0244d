use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// GET /api/healthcheck
#[get("/healthcheck")]
pub async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
