//! Device directory handler.

use acs_core::DirectoryUser;
use axum::Json;
use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// GET /api/hik-users - Users enrolled on the device.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<DirectoryUser>>> {
    Ok(Json(state.users.fetch_users().await?))
}
