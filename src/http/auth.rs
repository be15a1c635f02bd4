//! OAuth browser endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use crate::mattermost::handlers::connect;
use crate::state::AppState;
use crate::Result;

const DEFAULT_REDIRECT_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Netlify connected</title>
  </head>
  <body>
    <p>Your Netlify account is now connected with Mattermost.</p>
    <p>You can safely close this page and head back to your Mattermost app.</p>
  </body>
</html>
"#;

/// Query of `GET /auth/connect`.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    #[serde(default)]
    state: String,
}

/// Query of `GET /auth/redirect`.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    #[serde(default)]
    code: String,
    #[serde(default)]
    state: String,
}

/// Redirect the browser to the Netlify authorize page.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the state was never issued.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConnectParams>,
) -> Result<Response> {
    let url = connect::authorize_url(&state, &params.state).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// Complete the OAuth round-trip and show the closing page.
///
/// # Errors
///
/// See [`connect::complete`].
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RedirectParams>,
) -> Result<Html<String>> {
    connect::complete(&state, &params.code, &params.state).await?;
    Ok(Html(redirect_page(&state).await))
}

async fn redirect_page(state: &AppState) -> String {
    let Some(path) = &state.config.auth_redirect_page else {
        return DEFAULT_REDIRECT_PAGE.to_owned();
    };
    match tokio::fs::read_to_string(path).await {
        Ok(page) => page,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read auth redirect page");
            DEFAULT_REDIRECT_PAGE.to_owned()
        }
    }
}
