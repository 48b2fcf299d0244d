//! Server-wide middleware construction helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS and request-logging layers.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// CORS policy for the check-in client.
///
/// The front desk UI is served from a separate origin during development,
/// so any origin is accepted; there is no cookie-based auth to protect.
pub fn build_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}

/// Request/response logger in the standard combined-ish format.
pub fn request_logger() -> Logger {
    Logger::new("%a \"%r\" %s %b %Dms")
}
