//! Attendance event handler.

use acs_core::{AttendanceRecord, EventQuery, normalize};
use axum::Json;
use axum::extract::{Query, State};

use crate::error::Result;
use crate::state::AppState;

/// GET /api/eventos - Normalized attendance between `start` and `end`.
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<AttendanceRecord>>> {
    let raw = state.events.fetch_all_events(&query).await?;
    let attendance = normalize(&raw);
    tracing::debug!(raw = raw.len(), attendance = attendance.len(), "normalized events");
    Ok(Json(attendance))
}
