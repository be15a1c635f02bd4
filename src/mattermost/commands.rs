//! Slash command router.

use tracing::info;

use crate::mattermost::handlers::{
    connect, connected_token, deploy, disconnect, help, list, me, rollback, subscribe,
};
use crate::mattermost::messages;
use crate::models::command::{CommandResponse, ParsedCommand, SlashCommandRequest};
use crate::state::AppState;
use crate::Result;

/// Route a slash command to its handler.
///
/// `connect` and `help` work for everyone; every other action needs a
/// connected Netlify account.
///
/// # Errors
///
/// Returns an `AppError` if persistence or a Mattermost post fails.
pub async fn handle_command(
    state: &AppState,
    request: &SlashCommandRequest,
) -> Result<CommandResponse> {
    let parsed = ParsedCommand::parse(&request.command, &request.text);
    info!(
        user_id = %request.user_id,
        channel_id = %request.channel_id,
        action = %parsed.action,
        "received slash command"
    );

    if parsed.base != state.config.base_command() {
        return Ok(CommandResponse::empty());
    }

    match parsed.action.as_str() {
        "connect" => return connect::command(state, request).await,
        "help" | "" => return Ok(help::command(state)),
        _ => {}
    }

    let Some(access_token) = connected_token(state, &request.user_id).await? else {
        return Ok(CommandResponse::ephemeral(messages::not_connected(
            &parsed.base,
        )));
    };

    match (parsed.action.as_str(), parsed.parameters.as_slice()) {
        ("disconnect", _) => Ok(disconnect::command(state)),
        ("list", []) => list::command(state, request, &access_token, false).await,
        ("list", [param]) if param == "id" => {
            list::command(state, request, &access_token, true).await
        }
        ("list", params) => Ok(CommandResponse::ephemeral(messages::unknown_command(
            &parsed.base,
            &format!("list {}", params.join(" ")),
        ))),
        ("me", _) => me::command(state, request, &access_token).await,
        ("deploy", params) => deploy::command(state, request, &access_token, params).await,
        ("rollback", _) => Ok(rollback::command(state, &access_token).await),
        ("subscribe", _) => Ok(subscribe::subscribe_command(state, &access_token).await),
        ("unsubscribe", _) => Ok(subscribe::unsubscribe_command(state, &access_token).await),
        (action, _) => Ok(CommandResponse::ephemeral(messages::unknown_command(
            &parsed.base,
            action,
        ))),
    }
}
