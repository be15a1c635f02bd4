//! `/netlify help`.

use crate::mattermost::messages;
use crate::models::command::CommandResponse;
use crate::state::AppState;

/// Ephemeral list of commands.
#[must_use]
pub fn command(state: &AppState) -> CommandResponse {
    CommandResponse::ephemeral(messages::help_text(&state.config.base_command()))
}
