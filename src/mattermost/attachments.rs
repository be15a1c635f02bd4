//! Interactive attachment builders.
//!
//! Every element carries the action secret in its integration context so
//! callbacks can prove the message came from this service.

use serde_json::{Map, Value};

use crate::models::netlify::{Build, Site};
use crate::models::post::{Attachment, PostAction, PostActionIntegration, PostActionOption};
use crate::models::webhook::{DeployEvent, DeployEventKind};

/// Context key holding the button action.
pub const CONTEXT_ACTION: &str = "action";
/// Context key holding the action secret.
pub const CONTEXT_SECRET: &str = "actionSecret";

/// Button action confirming a disconnect.
pub const ACTION_DISCONNECT: &str = "disconnect";
/// Button action cancelling a disconnect.
pub const ACTION_CANCEL: &str = "cancel";

const DISCONNECT_TEXT: &str = ":scissors: Are you sure you would like to disconnect Netlify from Mattermost?\n\
     If you have any question or concerns please [report](https://github.com/M-ZubairAhmed/mattermost-plugin-netlify/issues/new)";

const COLOR_BUILDING: &str = "#c2a344";
const COLOR_CREATED: &str = "#3ab259";
const COLOR_FAILED: &str = "#b2593a";

/// Integration context for an element.
#[must_use]
pub fn action_context(action: &str, secret: &str) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(CONTEXT_ACTION.into(), Value::String(action.into()));
    context.insert(CONTEXT_SECRET.into(), Value::String(secret.into()));
    context
}

/// Button posting `action` to `url`.
#[must_use]
pub fn button(name: &str, url: &str, action: &str, secret: &str) -> PostAction {
    PostAction {
        action_type: "button".into(),
        name: name.into(),
        disabled: false,
        options: Vec::new(),
        integration: PostActionIntegration {
            url: url.into(),
            context: action_context(action, secret),
        },
    }
}

/// Dropdown posting the selected option to `url`.
#[must_use]
pub fn select(name: &str, url: &str, secret: &str, options: Vec<PostActionOption>) -> PostAction {
    PostAction {
        action_type: "select".into(),
        name: name.into(),
        disabled: false,
        options,
        integration: PostActionIntegration {
            url: url.into(),
            context: action_context("", secret),
        },
    }
}

/// Confirmation prompt for `/netlify disconnect`.
#[must_use]
pub fn disconnect_prompt(url: &str, secret: &str) -> Attachment {
    Attachment {
        title: "Disconnect Netlify plugin".into(),
        text: DISCONNECT_TEXT.into(),
        actions: vec![
            button("Disconnect", url, ACTION_DISCONNECT, secret),
            button("Cancel", url, ACTION_CANCEL, secret),
        ],
        ..Attachment::default()
    }
}

/// Dropdown of sites. With `include_branch` the option value is
/// `"<id> <name> <branch>"`, otherwise `"<id> <name>"`.
#[must_use]
pub fn site_picker(
    text: &str,
    url: &str,
    secret: &str,
    sites: &[Site],
    include_branch: bool,
) -> Attachment {
    let options = sites
        .iter()
        .map(|site| {
            let value = if include_branch {
                format!("{} {} {}", site.id, site.name, site.branch())
            } else {
                format!("{} {}", site.id, site.name)
            };
            PostActionOption {
                text: site.name.clone(),
                value,
            }
        })
        .collect();

    Attachment {
        text: text.into(),
        actions: vec![select("Select a site", url, secret, options)],
        ..Attachment::default()
    }
}

/// Dropdown of restorable builds, numbered like the build table.
#[must_use]
pub fn rollback_picker(
    url: &str,
    secret: &str,
    site_id: &str,
    site_name: &str,
    builds: &[Build],
) -> Attachment {
    let options = builds
        .iter()
        .enumerate()
        .map(|(index, build)| PostActionOption {
            text: format!("To sequence No.{}", index + 1),
            value: format!("{site_id} {site_name} {}", build.deploy_id),
        })
        .collect();

    Attachment {
        text: "Select the release to roll back to".into(),
        actions: vec![select("Select a release", url, secret, options)],
        ..Attachment::default()
    }
}

/// Build notification for a subscribed channel.
#[must_use]
pub fn deploy_notification(kind: DeployEventKind, event: &DeployEvent) -> Attachment {
    let name = event.name.as_deref().unwrap_or_default();
    let build_log = event.build_log_url();
    let footer = format!(
        "Using git {} branch",
        event.branch.as_deref().unwrap_or_default()
    );

    match kind {
        DeployEventKind::Building => Attachment {
            fallback: format!("New deploy in process for {name}"),
            color: COLOR_BUILDING.into(),
            pretext: format!(":flight_departure: There is a new deploy in process for **{name}**"),
            title: "Visit the build log".into(),
            title_link: build_log,
            footer,
            ..Attachment::default()
        },
        DeployEventKind::Created => Attachment {
            fallback: format!("Successful deploy of {name}"),
            color: COLOR_CREATED.into(),
            pretext: format!(":rocket: Successful deploy of **{name}**"),
            title: "Visit the changes live".into(),
            title_link: event.deploy_ssl_url.clone().unwrap_or_default(),
            text: format!("Or check out the [build log]({build_log})"),
            footer,
            ..Attachment::default()
        },
        DeployEventKind::Failed => Attachment {
            fallback: format!("Deploy of {name} failed"),
            color: COLOR_FAILED.into(),
            pretext: format!(":fire: Something went wrong deploying **{name}**"),
            title: "Visit the build log".into(),
            title_link: build_log,
            text: format!(
                "The last message we got from the build was `{}`",
                event.error_message.as_deref().unwrap_or_default()
            ),
            footer,
            ..Attachment::default()
        },
    }
}
