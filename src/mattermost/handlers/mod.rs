//! Slash command and interactive callback handlers.

pub mod connect;
pub mod deploy;
pub mod disconnect;
pub mod help;
pub mod list;
pub mod me;
pub mod rollback;
pub mod subscribe;

use tracing::warn;

use crate::mattermost::attachments;
use crate::mattermost::messages;
use crate::models::command::CommandResponse;
use crate::state::AppState;
use crate::Result;

/// Decrypted access token of a connected user.
///
/// A token that cannot be decrypted counts as not connected; the user can
/// simply connect again.
///
/// # Errors
///
/// Returns `AppError::Db` if the store cannot be read.
pub async fn connected_token(state: &AppState, user_id: &str) -> Result<Option<String>> {
    match state.tokens.get(user_id).await {
        Ok(Some(token)) if !token.is_empty() => Ok(Some(token)),
        Ok(_) => Ok(None),
        Err(crate::AppError::Crypto(err)) => {
            warn!(user_id, %err, "stored token is unreadable");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Ephemeral dropdown of the user's sites posting to `/command/<action>`.
pub(crate) async fn site_picker_response(
    state: &AppState,
    access_token: &str,
    text: &str,
    action: &str,
    include_branch: bool,
) -> CommandResponse {
    let sites = match state.netlify.session(access_token).list_sites().await {
        Ok(sites) => sites,
        Err(err) => {
            warn!(%err, "failed to list sites");
            return CommandResponse::ephemeral(messages::netlify_failure(
                "receive sites list from Netlify",
                &err.to_string(),
            ));
        }
    };

    if sites.is_empty() {
        return CommandResponse::ephemeral(messages::NO_SITES);
    }

    let picker = attachments::site_picker(
        text,
        &state.config.action_url(action),
        &state.action_secret,
        &sites,
        include_branch,
    );
    CommandResponse::ephemeral_attachments("", vec![picker])
}
