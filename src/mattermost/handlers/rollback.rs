//! `/netlify rollback`: pick a site, then one of its recent deploys.

use tracing::{info, warn};

use crate::mattermost::attachments;
use crate::mattermost::handlers::site_picker_response;
use crate::mattermost::messages;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::models::command::CommandResponse;
use crate::models::netlify::Build;
use crate::models::post::{Post, PostProps};
use crate::state::AppState;

/// Callback route of the site picker.
pub const BUILDS_ROUTE: &str = "rollback-builds";
/// Callback route of the release picker.
pub const RESTORE_ROUTE: &str = "rollback";

const MAX_RELEASES: usize = 5;

/// `/netlify rollback`.
pub async fn command(state: &AppState, access_token: &str) -> CommandResponse {
    site_picker_response(
        state,
        access_token,
        "Select a site to roll back",
        BUILDS_ROUTE,
        false,
    )
    .await
}

/// Most recent finished builds without errors, newest first.
#[must_use]
pub fn restorable_builds(builds: Vec<Build>) -> Vec<Build> {
    builds
        .into_iter()
        .filter(Build::is_restorable)
        .take(MAX_RELEASES)
        .collect()
}

/// List recent releases of the picked site (`"<id> <name>"`) and offer them
/// in a dropdown.
pub async fn list_builds_action(
    state: &AppState,
    request: &ActionRequest,
    access_token: &str,
    fields: &[&str],
) -> ActionResponse {
    let [site_id, site_name, ..] = fields else {
        return ActionResponse::ephemeral(messages::EMPTY_SELECTION);
    };

    let builds = match state.netlify.session(access_token).list_builds(site_id).await {
        Ok(builds) => restorable_builds(builds),
        Err(err) => {
            warn!(site_id, %err, "failed to list builds");
            return ActionResponse::ephemeral(messages::netlify_failure(
                &format!("get deploys of **{site_name}** site"),
                &err.to_string(),
            ));
        }
    };

    if builds.is_empty() {
        return ActionResponse::ephemeral(messages::no_valid_deploys(site_name));
    }

    let table = Post::plain(&request.channel_id, messages::build_table(site_name, &builds));
    if let Err(err) = state.mattermost.create_post(&table).await {
        warn!(%err, "failed to post release table");
    }

    let picker = attachments::rollback_picker(
        &state.config.action_url(RESTORE_ROUTE),
        &state.action_secret,
        site_id,
        site_name,
        &builds,
    );
    ActionResponse::update(
        messages::fetching_builds(site_name),
        PostProps::with_attachments(vec![picker]),
    )
}

/// Restore the picked release (`"<site id> <site name> <deploy id>"`).
pub async fn restore_action(
    state: &AppState,
    request: &ActionRequest,
    access_token: &str,
    fields: &[&str],
) -> ActionResponse {
    let [site_id, site_name, deploy_id, ..] = fields else {
        return ActionResponse::ephemeral(messages::EMPTY_SELECTION);
    };

    let response = ActionResponse::update_message(messages::preparing_rollback(site_name, deploy_id));
    if let Err(err) = state
        .netlify
        .session(access_token)
        .restore_deploy(site_id, deploy_id)
        .await
    {
        warn!(site_id, deploy_id, %err, "rollback failed");
        return response.with_ephemeral(messages::netlify_failure(
            &format!("rollback **{site_name}** site"),
            &err.to_string(),
        ));
    }
    info!(site_id, deploy_id, "rollback requested");

    let announcement = Post::plain(
        &request.channel_id,
        messages::rollback_requested(site_name, deploy_id),
    );
    if let Err(err) = state.mattermost.create_post(&announcement).await {
        warn!(%err, "failed to announce rollback");
    }
    response
}
