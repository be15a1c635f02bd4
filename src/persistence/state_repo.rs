//! Single-use anti-CSRF states for the OAuth round-trip.
//!
//! A state has the shape `<random-id>_<userID>`. The value stored under the
//! key is the state itself, so lookup and comparison use the same string.
//! A state older than the configured TTL is treated as never issued.

use uuid::Uuid;

use crate::Result;

use super::kv::{KvKind, KvStore};
use super::retention::expiry_cutoff;

const RANDOM_ID_LEN: usize = 15;

/// Repository for pending OAuth states.
#[derive(Clone)]
pub struct StateRepo {
    kv: KvStore,
    ttl_seconds: u64,
}

/// Mattermost user ID embedded in a state, i.e. everything after the first `_`.
#[must_use]
pub fn user_id_from_state(state: &str) -> Option<&str> {
    state
        .split_once('_')
        .map(|(_, user_id)| user_id)
        .filter(|user_id| !user_id.is_empty())
}

impl StateRepo {
    /// Create a new repository whose states expire after `ttl_seconds`.
    #[must_use]
    pub fn new(kv: KvStore, ttl_seconds: u64) -> Self {
        Self { kv, ttl_seconds }
    }

    /// Issue and persist a fresh state for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn issue(&self, user_id: &str) -> Result<String> {
        let random: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(RANDOM_ID_LEN)
            .collect();
        let state = format!("{random}_{user_id}");
        self.kv
            .set(KvKind::OAuthState, &state, state.as_bytes())
            .await?;
        Ok(state)
    }

    /// Stored value for `state`, or `None` if it was never issued, has
    /// expired or has already been used.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the read fails.
    pub async fn lookup(&self, state: &str) -> Result<Option<String>> {
        Ok(self
            .kv
            .get_kind_since(KvKind::OAuthState, state, expiry_cutoff(self.ttl_seconds))
            .await?
            .map(|raw| String::from_utf8_lossy(&raw).into_owned()))
    }

    /// Delete `state` so it cannot be replayed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn consume(&self, state: &str) -> Result<bool> {
        self.kv.delete_kind(KvKind::OAuthState, state).await
    }
}
