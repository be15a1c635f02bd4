//! Background purge of abandoned OAuth states.
//!
//! A state is consumed on the redirect; states that never come back would
//! otherwise stay in the store forever.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::db::Database;
use super::kv::{KvKind, KvStore};
use crate::Result;

const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Spawn the retention purge background task.
///
/// The task runs hourly and deletes OAuth states older than `ttl_seconds`.
#[must_use]
pub fn spawn_retention_task(
    db: Arc<Database>,
    ttl_seconds: u64,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let kv = KvStore::new(db);
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("retention task shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(err) = purge(&kv, ttl_seconds).await {
                        error!(?err, "retention purge failed");
                    }
                }
            }
        }
    })
}

/// Oldest write time still inside a TTL of `ttl_seconds`.
#[must_use]
pub fn expiry_cutoff(ttl_seconds: u64) -> DateTime<Utc> {
    let ttl = i64::try_from(ttl_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    Utc::now()
        .checked_sub_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Delete OAuth states older than `ttl_seconds`. Returns the number removed.
///
/// # Errors
///
/// Returns `AppError::Db` if the delete fails.
pub async fn purge(kv: &KvStore, ttl_seconds: u64) -> Result<u64> {
    let cutoff = expiry_cutoff(ttl_seconds);
    let removed = kv.purge_kind_before(KvKind::OAuthState, cutoff).await?;
    info!(removed, ttl_seconds, "retention purge completed");
    Ok(removed)
}
