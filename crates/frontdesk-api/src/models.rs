//! Request payloads and the uniform response envelope.
//!
//! Body fields are `Option` so that a missing field surfaces as our own
//! enveloped 400 instead of a bare deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response wrapper for every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /api/seminars`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeminarRequest {
    pub name: Option<String>,
    pub organizer: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub room: Option<String>,
}

/// Body of `POST /api/attendees`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendeeRequest {
    pub seminar_id: Option<String>,
    pub full_name: Option<String>,
    pub room_number: Option<String>,
}

/// Body of `POST /api/attendees/bulk`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendeeRequest {
    pub seminar_id: Option<String>,
    pub attendees: Option<Vec<BulkAttendeeRow>>,
}

/// One roster row in a bulk import. Fields are raw JSON values because
/// spreadsheet exports send room numbers as either strings or numbers;
/// rows that do not validate are skipped silently.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendeeRow {
    pub full_name: Option<Value>,
    pub room_number: Option<Value>,
}

impl BulkAttendeeRow {
    /// Returns `(full_name, room_number)` when the row is valid.
    pub fn validate(&self) -> Option<(String, String)> {
        let full_name = match &self.full_name {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return None,
        };
        let room_number = match &self.room_number {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return None,
        };
        Some((full_name, room_number))
    }
}
