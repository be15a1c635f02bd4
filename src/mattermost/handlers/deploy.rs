//! `/netlify deploy` and the deploy site picker.

use tracing::{info, warn};

use crate::mattermost::handlers::site_picker_response;
use crate::mattermost::messages;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::models::command::{CommandResponse, SlashCommandRequest};
use crate::models::netlify::BOT_BUILD_HOOK_TITLE;
use crate::models::post::Post;
use crate::state::AppState;
use crate::Result;

/// Callback route of the site picker.
pub const ROUTE: &str = "deploy";

/// Start a build of `branch` through the bot's build hook and announce it
/// in `channel_id`.
///
/// Reuses the hook titled [`BOT_BUILD_HOOK_TITLE`] when the site already
/// has one and creates it otherwise.
///
/// # Errors
///
/// Returns `AppError::Netlify` if any Netlify call fails and
/// `AppError::Mattermost` if the announcement cannot be posted.
pub async fn deploy_site(
    state: &AppState,
    access_token: &str,
    channel_id: &str,
    site_id: &str,
    site_name: &str,
    branch: &str,
) -> Result<()> {
    let session = state.netlify.session(access_token);
    let existing = session
        .list_build_hooks(site_id)
        .await?
        .into_iter()
        .find(|hook| hook.title == BOT_BUILD_HOOK_TITLE);

    let hook = match existing {
        Some(hook) => hook,
        None => {
            info!(site_id, "creating bot build hook");
            session.create_build_hook(site_id, branch).await?
        }
    };

    state.netlify.trigger_build_hook(&hook.url, branch).await?;
    info!(site_id, branch, "deploy requested");

    state
        .mattermost
        .create_post(&Post::plain(
            channel_id,
            messages::deploy_requested(site_name, branch),
        ))
        .await
}

/// `/netlify deploy [site id]`.
///
/// # Errors
///
/// Never fails; every problem is reported back to the user.
pub async fn command(
    state: &AppState,
    request: &SlashCommandRequest,
    access_token: &str,
    parameters: &[String],
) -> Result<CommandResponse> {
    let site_id = match parameters {
        [] => {
            return Ok(site_picker_response(
                state,
                access_token,
                "Select a site to deploy",
                ROUTE,
                true,
            )
            .await)
        }
        [site_id] => site_id,
        _ => {
            return Ok(CommandResponse::ephemeral(messages::one_site_only(
                &state.config.base_command(),
            )))
        }
    };

    let site = match state.netlify.session(access_token).get_site(site_id).await {
        Ok(site) => site,
        Err(err) => {
            return Ok(CommandResponse::ephemeral(messages::netlify_failure(
                "get site details",
                &err.to_string(),
            )))
        }
    };

    let preparing = Post::plain(
        &request.channel_id,
        messages::preparing_deploy(&site.name, site.branch()),
    );
    if let Err(err) = state
        .mattermost
        .send_ephemeral(&request.user_id, &preparing)
        .await
    {
        warn!(%err, "failed to send deploy progress note");
    }

    if let Err(err) = deploy_site(
        state,
        access_token,
        &request.channel_id,
        &site.id,
        &site.name,
        site.branch(),
    )
    .await
    {
        warn!(site_id = %site.id, %err, "deploy failed");
        return Ok(CommandResponse::ephemeral(messages::deploy_failed(
            &site.name,
            &err.to_string(),
        )));
    }

    Ok(CommandResponse::empty())
}

/// Deploy the site picked from the dropdown (`"<id> <name> <branch>"`).
pub async fn action(
    state: &AppState,
    request: &ActionRequest,
    access_token: &str,
    fields: &[&str],
) -> ActionResponse {
    let [site_id, site_name, branch, ..] = fields else {
        return ActionResponse::ephemeral(messages::EMPTY_SELECTION);
    };

    let response = ActionResponse::update_message(messages::preparing_deploy(site_name, branch));
    match deploy_site(
        state,
        access_token,
        &request.channel_id,
        site_id,
        site_name,
        branch,
    )
    .await
    {
        Ok(()) => response,
        Err(err) => {
            warn!(site_id, %err, "deploy failed");
            response.with_ephemeral(messages::deploy_failed(site_name, &err.to_string()))
        }
    }
}
