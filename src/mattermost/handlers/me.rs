//! `/netlify me`.

use crate::mattermost::messages;
use crate::models::command::{CommandResponse, SlashCommandRequest};
use crate::models::post::Post;
use crate::state::AppState;
use crate::Result;

/// Post the connected account's details in the channel.
///
/// # Errors
///
/// Returns `AppError::Mattermost` if the details cannot be posted.
pub async fn command(
    state: &AppState,
    request: &SlashCommandRequest,
    access_token: &str,
) -> Result<CommandResponse> {
    let account = match state.netlify.session(access_token).get_account().await {
        Ok(account) => account,
        Err(err) => {
            return Ok(CommandResponse::ephemeral(messages::netlify_failure(
                "get current user",
                &err.to_string(),
            )))
        }
    };

    state
        .mattermost
        .create_post(&Post::plain(
            &request.channel_id,
            messages::account_details(&account),
        ))
        .await?;
    Ok(CommandResponse::empty())
}
