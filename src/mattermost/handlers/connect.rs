//! `/netlify connect` and the OAuth round-trip it starts.

use tracing::{info, warn};

use crate::mattermost::messages;
use crate::models::command::{CommandResponse, SlashCommandRequest};
use crate::persistence::state_repo::user_id_from_state;
use crate::state::AppState;
use crate::{AppError, Result};

/// Issue a state and reply with the connect link.
///
/// # Errors
///
/// Returns `AppError::Db` if the state cannot be stored.
pub async fn command(state: &AppState, request: &SlashCommandRequest) -> Result<CommandResponse> {
    let oauth_state = state.states.issue(&request.user_id).await?;
    let url = format!(
        "{}/auth/connect?state={oauth_state}",
        state.config.public_url
    );
    Ok(CommandResponse::ephemeral(messages::connect_link(&url)))
}

/// Netlify authorize URL for a previously issued state.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the state is unknown.
pub async fn authorize_url(state: &AppState, oauth_state: &str) -> Result<String> {
    if oauth_state.is_empty() || state.states.lookup(oauth_state).await?.is_none() {
        return Err(AppError::BadRequest("unknown OAuth state".into()));
    }
    Ok(state.oauth.authorize_url(oauth_state))
}

/// Finish the OAuth round-trip: check and consume the state, exchange the
/// code and store the token. Returns the connected user ID.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the state was never issued or the code
/// is missing, `AppError::Forbidden` if the state does not match and
/// `AppError::OAuth` if the code exchange fails.
pub async fn complete(state: &AppState, code: &str, oauth_state: &str) -> Result<String> {
    let Some(stored) = state.states.lookup(oauth_state).await? else {
        return Err(AppError::BadRequest("AntiCSRF state not found".into()));
    };
    if stored.is_empty() || stored != oauth_state {
        return Err(AppError::Forbidden("Cross-site request forgery".into()));
    }
    state.states.consume(oauth_state).await?;

    let user_id = user_id_from_state(oauth_state)
        .ok_or_else(|| AppError::Forbidden("Cross-site request forgery".into()))?
        .to_owned();
    if code.is_empty() {
        return Err(AppError::BadRequest("authorization code missing".into()));
    }

    let access_token = state.oauth.exchange_code(code).await?;
    state.tokens.store(&user_id, &access_token).await?;
    info!(%user_id, "netlify account connected");

    let welcome = messages::welcome(&state.config.base_command());
    if let Err(err) = state.mattermost.send_direct_message(&user_id, &welcome).await {
        warn!(%user_id, %err, "failed to send welcome message");
    }

    Ok(user_id)
}
