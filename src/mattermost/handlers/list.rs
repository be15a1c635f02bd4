//! `/netlify list` and `/netlify list id`.

use crate::mattermost::messages;
use crate::models::command::{CommandResponse, SlashCommandRequest};
use crate::models::post::Post;
use crate::state::AppState;
use crate::Result;

/// Post a table of the user's sites in the channel.
///
/// # Errors
///
/// Returns `AppError::Mattermost` if the table cannot be posted.
pub async fn command(
    state: &AppState,
    request: &SlashCommandRequest,
    access_token: &str,
    ids_only: bool,
) -> Result<CommandResponse> {
    let sites = match state.netlify.session(access_token).list_sites().await {
        Ok(sites) => sites,
        Err(err) => {
            return Ok(CommandResponse::ephemeral(messages::netlify_failure(
                "receive sites list from Netlify",
                &err.to_string(),
            )))
        }
    };

    if sites.is_empty() {
        return Ok(CommandResponse::ephemeral(messages::NO_SITES));
    }

    let table = messages::site_table(&sites, ids_only);
    state
        .mattermost
        .create_post(&Post::plain(&request.channel_id, table))
        .await?;
    Ok(CommandResponse::empty())
}
