//! HTTP surface: slash commands, interactive callbacks, OAuth and webhooks.

pub mod actions;
pub mod auth;
pub mod command;
pub mod webhook;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;
use crate::{AppError, Result};

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/command", post(command::handle))
        .route("/command/{action}", post(actions::handle))
        .route("/auth/connect", get(auth::connect))
        .route("/auth/redirect", get(auth::redirect))
        .route("/webhook", post(webhook::handle))
        .with_state(state)
}

/// Serve the router on an already bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Io` if the server fails.
pub async fn serve_on(
    listener: TcpListener,
    state: Arc<AppState>,
    ct: CancellationToken,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Io(format!("http server error: {err}")))?;

    info!("http server shut down");
    Ok(())
}

/// Bind `0.0.0.0:<http_port>` and serve until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the port cannot be bound and
/// `AppError::Io` if the server fails.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind http on {bind}: {err}")))?;

    info!(%bind, "starting http server");
    serve_on(listener, state, ct).await
}
