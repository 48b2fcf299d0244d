//! Seminar CRUD routes.

use super::{bad, entity_error, is_filled, not_found, ok, run_blocking};
use crate::models::NewSeminarRequest;
use actix_web::{delete, get, post, put, web, Responder};
use frontdesk_core::{AppContext, Seminar, SeminarPatch};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// GET /api/seminars
#[get("/seminars")]
pub async fn list_seminars(ctx: web::Data<Arc<AppContext>>) -> impl Responder {
    let ctx = ctx.get_ref().clone();
    match run_blocking(move || ctx.seminars().list()).await {
        Ok(items) => ok(items),
        Err(e) => entity_error(e),
    }
}

/// POST /api/seminars
#[post("/seminars")]
pub async fn create_seminar(
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<NewSeminarRequest>,
) -> impl Responder {
    let body = body.into_inner();
    if !is_filled(&body.name) || !is_filled(&body.organizer) || !is_filled(&body.room) {
        return bad("Missing required seminar fields");
    }

    let seminar = Seminar {
        id: Uuid::new_v4().to_string(),
        name: body.name.unwrap_or_default(),
        organizer: body.organizer.unwrap_or_default(),
        start_date: body.start_date.unwrap_or_default(),
        end_date: body.end_date.unwrap_or_default(),
        room: body.room.unwrap_or_default(),
    };

    let ctx = ctx.get_ref().clone();
    match run_blocking(move || ctx.seminars().create(seminar)).await {
        Ok(created) => ok(created),
        Err(e) => entity_error(e),
    }
}

/// PUT /api/seminars/{id}
#[put("/seminars/{id}")]
pub async fn update_seminar(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<SeminarPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        if !ctx.seminars().exists(&id)? {
            return Err(frontdesk_core::EntityError::NotFound(
                "Seminar not found".to_string(),
            ));
        }
        ctx.seminars().patch(&id, patch)
    })
    .await;

    match result {
        Ok(updated) => ok(updated),
        Err(e) => entity_error(e),
    }
}

/// DELETE /api/seminars/{id}
///
/// Also cascades to the seminar's attendees: the storage layer does not
/// enforce the weak `seminarId` reference, this route does.
#[delete("/seminars/{id}")]
pub async fn delete_seminar(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        if !ctx.seminars().delete(&id)? {
            return Ok(None);
        }

        let orphaned: Vec<String> = ctx
            .attendees()
            .list()?
            .into_iter()
            .filter(|a| a.seminar_id == id)
            .map(|a| a.id)
            .collect();
        if !orphaned.is_empty() {
            let removed = ctx.attendees().delete_many(&orphaned)?;
            log::info!(
                "Cascade-deleted {} attendee(s) of seminar '{}'",
                removed.len(),
                id
            );
        }
        Ok(Some(id))
    })
    .await;

    match result {
        Ok(Some(id)) => ok(json!({ "id": id })),
        Ok(None) => not_found("Seminar not found"),
        Err(e) => entity_error(e),
    }
}

/// GET /api/seminars/{id}/attendees
#[get("/seminars/{id}/attendees")]
pub async fn list_seminar_attendees(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> impl Responder {
    let seminar_id = path.into_inner();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        Ok(ctx
            .attendees()
            .list()?
            .into_iter()
            .filter(|a| a.seminar_id == seminar_id)
            .collect::<Vec<_>>())
    })
    .await;

    match result {
        Ok(items) => ok(items),
        Err(e) => entity_error(e),
    }
}
