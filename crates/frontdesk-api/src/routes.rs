//! API routes configuration.

use crate::handlers;
use actix_web::web;

/// Mounts every endpoint under the `/api` scope.
///
/// - GET    /api/seminars
/// - POST   /api/seminars
/// - PUT    /api/seminars/{id}
/// - DELETE /api/seminars/{id}           (cascades to its attendees)
/// - GET    /api/seminars/{id}/attendees
/// - POST   /api/attendees
/// - POST   /api/attendees/bulk
/// - PUT    /api/attendees/{id}
/// - DELETE /api/attendees/{id}
/// - POST   /api/attendees/{id}/checkin
/// - GET    /api/healthcheck
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::list_seminars)
            .service(handlers::create_seminar)
            .service(handlers::update_seminar)
            .service(handlers::delete_seminar)
            .service(handlers::list_seminar_attendees)
            .service(handlers::create_attendee)
            .service(handlers::create_attendees_bulk)
            .service(handlers::update_attendee)
            .service(handlers::delete_attendee)
            .service(handlers::checkin_attendee)
            .service(handlers::healthcheck),
    );
}
