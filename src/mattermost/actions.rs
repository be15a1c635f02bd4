//! Interactive message callback router.
//!
//! Every callback is authenticated by the action secret embedded in the
//! message that carried the button or dropdown.

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::mattermost::handlers::{connected_token, deploy, disconnect, rollback, subscribe};
use crate::mattermost::messages;
use crate::models::action::{ActionRequest, ActionResponse};
use crate::state::AppState;
use crate::{AppError, Result};

/// Number of whitespace separated fields each dropdown route expects.
fn expected_fields(route: &str) -> Option<usize> {
    match route {
        deploy::ROUTE | rollback::RESTORE_ROUTE => Some(3),
        rollback::BUILDS_ROUTE | subscribe::SUBSCRIBE_ROUTE | subscribe::UNSUBSCRIBE_ROUTE => {
            Some(2)
        }
        _ => None,
    }
}

/// Compare secrets in constant time.
fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Route an interactive callback posted to `/command/<route>`.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the request names no user,
/// `AppError::NotFound` for an unknown route and `AppError::BadRequest` for
/// an unknown disconnect action.
pub async fn handle_action(
    state: &AppState,
    route: &str,
    request: &ActionRequest,
) -> Result<ActionResponse> {
    if request.user_id.is_empty() {
        return Err(AppError::Unauthorized("missing user id".into()));
    }

    info!(user_id = %request.user_id, route, "received interactive action");

    if !secrets_match(&request.context.action_secret, &state.action_secret) {
        warn!(user_id = %request.user_id, route, "action secret mismatch");
        return Ok(ActionResponse::ephemeral(messages::AUTHENTICATION_FAILED));
    }

    if route == disconnect::ROUTE {
        return disconnect::action(state, request).await;
    }

    let Some(expected) = expected_fields(route) else {
        return Err(AppError::NotFound(format!("unknown action `{route}`")));
    };

    let fields = request.context.selected_fields();
    if fields.len() < expected {
        return Ok(ActionResponse::ephemeral(messages::EMPTY_SELECTION));
    }

    let Some(access_token) = connected_token(state, &request.user_id).await? else {
        return Ok(ActionResponse::ephemeral(messages::not_connected(
            &state.config.base_command(),
        )));
    };

    match route {
        deploy::ROUTE => Ok(deploy::action(state, request, &access_token, &fields).await),
        rollback::BUILDS_ROUTE => {
            Ok(rollback::list_builds_action(state, request, &access_token, &fields).await)
        }
        rollback::RESTORE_ROUTE => {
            Ok(rollback::restore_action(state, request, &access_token, &fields).await)
        }
        subscribe::SUBSCRIBE_ROUTE => {
            subscribe::subscribe_action(state, request, &access_token, &fields).await
        }
        _ => subscribe::unsubscribe_action(state, request, &fields).await,
    }
}
