#![forbid(unsafe_code)]

//! `mattermost-netlify` service binary.
//!
//! Bootstraps configuration, the database, the Mattermost bot client and the
//! HTTP server that Mattermost and Netlify call into.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use mattermost_netlify::config::GlobalConfig;
use mattermost_netlify::mattermost::client::MattermostService;
use mattermost_netlify::persistence::{db, retention};
use mattermost_netlify::state::AppState;
use mattermost_netlify::{http, AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "mattermost-netlify", about = "Mattermost bridge to Netlify", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("mattermost-netlify bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = GlobalConfig::load_from_path(&args.config)?;
    config.load_credentials().await?;
    let config = Arc::new(config);
    info!(public_url = %config.public_url, "configuration loaded");

    // ── Initialize database ─────────────────────────────
    let db = Arc::new(db::connect(&config.db_path).await?);
    info!(path = %config.db_path.display(), "database connected");

    // ── Start retention service ──────────────────────────
    let ct = CancellationToken::new();
    let retention_handle = retention::spawn_retention_task(
        Arc::clone(&db),
        config.oauth_state_ttl_seconds,
        ct.clone(),
    );
    info!("retention service started");

    // ── Connect to Mattermost ───────────────────────────
    let mattermost = Arc::new(MattermostService::connect(&config.mattermost).await?);

    let state = Arc::new(AppState::new(Arc::clone(&config), db, mattermost)?);

    // ── Start HTTP server ───────────────────────────────
    let http_ct = ct.clone();
    let http_state = Arc::clone(&state);
    let http_handle = tokio::spawn(async move {
        if let Err(err) = http::serve(http_state, http_ct).await {
            error!(%err, "http server failed");
        }
    });

    info!("mattermost-netlify ready");

    // ── Wait for shutdown signal ────────────────────────
    shutdown_signal().await;
    info!("shutdown signal received");
    ct.cancel();

    let (http_result, retention_result) = tokio::join!(http_handle, retention_handle);
    if let Err(err) = http_result {
        error!(%err, "http server task failed");
    }
    if let Err(err) = retention_result {
        error!(%err, "retention task failed");
    }
    state.db.close().await;
    info!("mattermost-netlify shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
