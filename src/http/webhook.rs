//! `POST /webhook`: Netlify build notifications.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use tracing::{info, warn};

use crate::mattermost::attachments::deploy_notification;
use crate::models::post::Post;
use crate::models::webhook::{DeployEvent, DeployEventKind};
use crate::netlify::signature;
use crate::state::AppState;
use crate::{AppError, Result};

/// Header carrying the event name.
pub const EVENT_HEADER: &str = "x-netlify-event";
/// Header carrying the JWS signature.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn is_json(headers: &HeaderMap) -> bool {
    header_str(headers, header::CONTENT_TYPE.as_str())
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Validate a build notification and fan it out to subscribed channels.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a non-JSON or unparsable body or an
/// unknown event, `AppError::Unauthorized` for a bad signature and
/// `AppError::NotFound` when no channel is subscribed to the site.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    if !is_json(&headers) {
        return Err(AppError::BadRequest(
            "content type must be application/json".into(),
        ));
    }

    if !state.config.webhook_secret.is_empty() {
        let provided = header_str(&headers, SIGNATURE_HEADER);
        if provided.is_empty() {
            return Err(AppError::Unauthorized("missing webhook signature".into()));
        }
        signature::verify(provided, &body, &state.config.webhook_secret)?;
    }

    let event: DeployEvent = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("invalid webhook body: {err}")))?;
    let site_id = event.site_id.as_deref().unwrap_or_default();

    let channels = state.subscriptions.channels(site_id).await?;
    if channels.is_empty() {
        return Err(AppError::NotFound(format!(
            "no subscriptions for site `{site_id}`"
        )));
    }

    let event_name = header_str(&headers, EVENT_HEADER);
    let Some(kind) = DeployEventKind::from_header(event_name) else {
        return Err(AppError::BadRequest(format!(
            "unsupported event `{event_name}`"
        )));
    };

    let attachment = deploy_notification(kind, &event);
    for channel_id in &channels {
        let post = Post::with_attachments(channel_id, vec![attachment.clone()]);
        if let Err(err) = state.mattermost.create_post(&post).await {
            warn!(site_id, %channel_id, %err, "failed to deliver build notification");
        }
    }

    info!(
        site_id,
        event = kind.as_str(),
        channels = channels.len(),
        "build notification delivered"
    );
    Ok(StatusCode::OK)
}
