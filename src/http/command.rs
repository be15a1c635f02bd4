//! `POST /command`: custom slash command endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::{Form, Json};
use tracing::warn;

use crate::mattermost::commands::handle_command;
use crate::models::command::{CommandResponse, SlashCommandRequest};
use crate::state::AppState;
use crate::{AppError, Result};

/// Verify the slash command token and dispatch.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the token does not match.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Form(request): Form<SlashCommandRequest>,
) -> Result<Json<CommandResponse>> {
    if request.token.is_empty() || request.token != state.config.mattermost.command_token {
        warn!(user_id = %request.user_id, "slash command token mismatch");
        return Err(AppError::Unauthorized("invalid command token".into()));
    }

    handle_command(&state, &request).await.map(Json)
}
