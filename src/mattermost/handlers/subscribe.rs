//! `/netlify subscribe` and `/netlify unsubscribe`.

use tracing::{info, warn};

use crate::mattermost::handlers::site_picker_response;
use crate::mattermost::messages;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::models::command::CommandResponse;
use crate::models::netlify::Hook;
use crate::models::post::Post;
use crate::models::webhook::DeployEventKind;
use crate::state::AppState;
use crate::Result;

/// Callback route of the subscribe site picker.
pub const SUBSCRIBE_ROUTE: &str = "subscribe";
/// Callback route of the unsubscribe site picker.
pub const UNSUBSCRIBE_ROUTE: &str = "unsubscribe";

/// `/netlify subscribe`.
pub async fn subscribe_command(state: &AppState, access_token: &str) -> CommandResponse {
    site_picker_response(
        state,
        access_token,
        "Select a site to receive its build notifications in this channel",
        SUBSCRIBE_ROUTE,
        false,
    )
    .await
}

/// `/netlify unsubscribe`.
pub async fn unsubscribe_command(state: &AppState, access_token: &str) -> CommandResponse {
    site_picker_response(
        state,
        access_token,
        "Select a site to stop its build notifications",
        UNSUBSCRIBE_ROUTE,
        false,
    )
    .await
}

async fn announce(state: &AppState, channel_id: &str, message: String) {
    if let Err(err) = state
        .mattermost
        .create_post(&Post::plain(channel_id, message))
        .await
    {
        warn!(channel_id, %err, "failed to post announcement");
    }
}

/// Subscribe the channel to the picked site (`"<id> <name>"`).
///
/// Registers any missing build hook on Netlify first. The channel is only
/// subscribed once every hook exists.
///
/// # Errors
///
/// Returns `AppError::Db` if the subscription cannot be stored.
pub async fn subscribe_action(
    state: &AppState,
    request: &ActionRequest,
    access_token: &str,
    fields: &[&str],
) -> Result<ActionResponse> {
    let [site_id, site_name, ..] = fields else {
        return Ok(ActionResponse::ephemeral(messages::EMPTY_SELECTION));
    };

    let progress = Post::plain(
        &request.channel_id,
        messages::subscribing(&request.channel_name, site_name),
    );
    if let Err(err) = state
        .mattermost
        .send_ephemeral(&request.user_id, &progress)
        .await
    {
        warn!(%err, "failed to send subscription progress note");
    }

    let session = state.netlify.session(access_token);
    let webhook_url = state.config.webhook_url();
    let existing = match session.list_hooks(site_id).await {
        Ok(hooks) => hooks,
        Err(err) => {
            warn!(site_id, %err, "failed to list hooks");
            return Ok(ActionResponse::ephemeral(messages::netlify_failure(
                &format!("get webhooks of **{site_name}** site"),
                &err.to_string(),
            )));
        }
    };

    let mut failed = Vec::new();
    for kind in DeployEventKind::ALL {
        let event = kind.as_str();
        let registered = existing
            .iter()
            .any(|hook| {
                hook.hook_type == "url" && hook.event == event && hook.data.url == webhook_url
            });
        if registered {
            continue;
        }

        match session
            .create_hook(&Hook::url_hook(site_id, event, &webhook_url))
            .await
        {
            Ok(_) => {
                info!(site_id, event, "created netlify hook");
                announce(
                    state,
                    &request.channel_id,
                    messages::hook_created(event, site_name),
                )
                .await;
            }
            Err(err) => {
                warn!(site_id, event, %err, "failed to create netlify hook");
                failed.push(event);
            }
        }
    }

    if !failed.is_empty() {
        warn!(site_id, channel_id = %request.channel_id, "subscription aborted");
        return Ok(ActionResponse::update_message(messages::site_selected(site_name))
            .with_ephemeral(messages::subscription_incomplete(site_name, &failed)));
    }

    let added = state
        .subscriptions
        .add(site_id, &request.channel_id)
        .await?;

    let response = if added {
        info!(site_id, channel_id = %request.channel_id, "channel subscribed");
        announce(
            state,
            &request.channel_id,
            messages::subscribed(&request.channel_name, site_name),
        )
        .await;
        ActionResponse::update_message(messages::site_selected(site_name))
    } else {
        ActionResponse::update_message(messages::already_subscribed(
            &request.channel_name,
            site_name,
        ))
    };
    Ok(response)
}

/// Drop every subscription of the picked site (`"<id> <name>"`).
///
/// Hooks registered on Netlify are left in place.
///
/// # Errors
///
/// Returns `AppError::Db` if the subscription cannot be removed.
pub async fn unsubscribe_action(
    state: &AppState,
    request: &ActionRequest,
    fields: &[&str],
) -> Result<ActionResponse> {
    let [site_id, site_name, ..] = fields else {
        return Ok(ActionResponse::ephemeral(messages::EMPTY_SELECTION));
    };

    state.subscriptions.remove_site(site_id).await?;
    info!(site_id, "site unsubscribed");
    announce(state, &request.channel_id, messages::unsubscribed(site_name)).await;
    Ok(ActionResponse::update_message(messages::site_selected(
        site_name,
    )))
}
