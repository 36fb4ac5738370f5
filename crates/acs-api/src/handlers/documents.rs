//! Stored schedule and employee documents.

use acs_store::Collection;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::Result;
use crate::state::AppState;

/// GET /api/schedules
pub async fn get_schedules(State(state): State<AppState>) -> Result<Json<Value>> {
    read_document(&state, Collection::Schedules).await
}

/// POST /api/schedules - Replaces the whole schedule document.
pub async fn save_schedules(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Result<Json<Value>> {
    write_document(&state, Collection::Schedules, document).await
}

/// GET /api/employees
pub async fn get_employees(State(state): State<AppState>) -> Result<Json<Value>> {
    read_document(&state, Collection::Employees).await
}

/// POST /api/employees - Replaces the whole employee document.
pub async fn save_employees(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Result<Json<Value>> {
    write_document(&state, Collection::Employees, document).await
}

async fn read_document(state: &AppState, collection: Collection) -> Result<Json<Value>> {
    let store = state.store.clone();
    let document = tokio::task::spawn_blocking(move || store.read(collection)).await??;
    Ok(Json(document))
}

async fn write_document(
    state: &AppState,
    collection: Collection,
    document: Value,
) -> Result<Json<Value>> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.write(collection, &document)).await??;
    Ok(Json(json!({ "success": true })))
}
