//! `/netlify disconnect` and its confirmation buttons.

use tracing::{info, warn};

use crate::mattermost::attachments::{self, ACTION_CANCEL, ACTION_DISCONNECT};
use crate::mattermost::handlers::connected_token;
use crate::mattermost::messages;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::models::command::CommandResponse;
use crate::models::post::Post;
use crate::state::AppState;
use crate::{AppError, Result};

/// Callback route of the confirmation buttons.
pub const ROUTE: &str = "disconnect";

/// Ephemeral confirmation prompt.
#[must_use]
pub fn command(state: &AppState) -> CommandResponse {
    let prompt =
        attachments::disconnect_prompt(&state.config.action_url(ROUTE), &state.action_secret);
    CommandResponse::ephemeral_attachments("", vec![prompt])
}

/// Handle a press of **Disconnect** or **Cancel**.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for any other button action, after the
/// prompt has been replaced, and `AppError::Db` if the token cannot be
/// removed.
pub async fn action(state: &AppState, request: &ActionRequest) -> Result<ActionResponse> {
    match request.context.action.as_str() {
        ACTION_CANCEL => Ok(ActionResponse::update_message(
            messages::DISCONNECT_CANCELLED,
        )),
        ACTION_DISCONNECT => {
            if connected_token(state, &request.user_id).await?.is_none() {
                return Ok(ActionResponse::ephemeral(messages::not_connected(
                    &state.config.base_command(),
                )));
            }
            state.tokens.delete(&request.user_id).await?;
            info!(user_id = %request.user_id, "netlify account disconnected");
            Ok(ActionResponse::update_message(messages::disconnected(
                &state.config.base_command(),
            )))
        }
        other => {
            dismiss_prompt(state, request).await;
            Err(AppError::BadRequest(format!(
                "unknown disconnect action `{other}`"
            )))
        }
    }
}

// A failed callback leaves the post alone, so the prompt is replaced out of band.
async fn dismiss_prompt(state: &AppState, request: &ActionRequest) {
    if request.post_id.is_empty() {
        return;
    }
    let replacement = Post::replacement(
        &request.post_id,
        &request.channel_id,
        messages::DISCONNECT_DISMISSED,
    );
    if let Err(err) = state
        .mattermost
        .send_ephemeral(&request.user_id, &replacement)
        .await
    {
        warn!(post_id = %request.post_id, %err, "failed to dismiss disconnect prompt");
    }
}
