//! `POST /command/{action}`: interactive message callbacks.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::mattermost::actions::handle_action;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::state::AppState;
use crate::Result;

/// Dispatch a button or dropdown callback.
///
/// # Errors
///
/// See [`handle_action`].
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>> {
    handle_action(&state, &action, &request).await.map(Json)
}
