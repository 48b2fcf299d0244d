//! Attendee CRUD and check-in routes.

use super::{bad, entity_error, is_filled, not_found, ok, run_blocking};
use crate::models::{BulkAttendeeRequest, NewAttendeeRequest};
use actix_web::{delete, post, put, web, Responder};
use chrono::Utc;
use frontdesk_core::{AppContext, Attendee, AttendeePatch};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

fn today_date_key() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// POST /api/attendees
#[post("/attendees")]
pub async fn create_attendee(
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<NewAttendeeRequest>,
) -> impl Responder {
    let body = body.into_inner();
    if !is_filled(&body.seminar_id) || !is_filled(&body.full_name) || !is_filled(&body.room_number)
    {
        return bad("Missing required attendee fields");
    }

    let attendee = Attendee {
        id: Uuid::new_v4().to_string(),
        seminar_id: body.seminar_id.unwrap_or_default(),
        full_name: body.full_name.unwrap_or_default(),
        room_number: body.room_number.unwrap_or_default(),
        breakfast_status: BTreeMap::new(),
    };

    let ctx = ctx.get_ref().clone();
    match run_blocking(move || ctx.attendees().create(attendee)).await {
        Ok(created) => ok(created),
        Err(e) => entity_error(e),
    }
}

/// POST /api/attendees/bulk
///
/// Imports a roster for one seminar. Rows failing validation are skipped
/// silently; the response lists only the attendees actually created.
#[post("/attendees/bulk")]
pub async fn create_attendees_bulk(
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<BulkAttendeeRequest>,
) -> impl Responder {
    let body = body.into_inner();
    let (Some(seminar_id), Some(rows)) = (body.seminar_id, body.attendees) else {
        return bad("Invalid request body for bulk attendee creation");
    };
    if seminar_id.trim().is_empty() {
        return bad("Invalid request body for bulk attendee creation");
    }

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        let mut created = Vec::new();
        for row in rows {
            let Some((full_name, room_number)) = row.validate() else {
                continue;
            };
            let attendee = Attendee {
                id: Uuid::new_v4().to_string(),
                seminar_id: seminar_id.clone(),
                full_name,
                room_number,
                breakfast_status: BTreeMap::new(),
            };
            created.push(ctx.attendees().create(attendee)?);
        }
        Ok(created)
    })
    .await;

    match result {
        Ok(created) => ok(created),
        Err(e) => entity_error(e),
    }
}

/// PUT /api/attendees/{id}
#[put("/attendees/{id}")]
pub async fn update_attendee(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<AttendeePatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        if !ctx.attendees().exists(&id)? {
            return Err(frontdesk_core::EntityError::NotFound(
                "Attendee not found".to_string(),
            ));
        }
        ctx.attendees().patch(&id, patch)
    })
    .await;

    match result {
        Ok(updated) => ok(updated),
        Err(e) => entity_error(e),
    }
}

/// DELETE /api/attendees/{id}
#[delete("/attendees/{id}")]
pub async fn delete_attendee(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || ctx.attendees().delete(&id).map(|deleted| (deleted, id))).await;

    match result {
        Ok((true, id)) => ok(json!({ "id": id })),
        Ok((false, _)) => not_found("Attendee not found"),
        Err(e) => entity_error(e),
    }
}

/// POST /api/attendees/{id}/checkin
///
/// Marks breakfast taken for today on the attendee. Idempotent.
#[post("/attendees/{id}/checkin")]
pub async fn checkin_attendee(
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    let today = today_date_key();

    let ctx = ctx.get_ref().clone();
    let result = run_blocking(move || {
        if !ctx.attendees().exists(&id)? {
            return Err(frontdesk_core::EntityError::NotFound(
                "Attendee not found".to_string(),
            ));
        }
        ctx.attendees().mark_breakfast_taken(&id, &today)
    })
    .await;

    match result {
        Ok(updated) => ok(updated),
        Err(e) => entity_error(e),
    }
}
