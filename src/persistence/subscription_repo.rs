//! Channels subscribed to a site's build notifications.
//!
//! Stored under `<siteID>_webhook` as space-joined channel IDs.

use crate::Result;

use super::kv::{KvKind, KvStore};

const SUBSCRIPTION_KEY_SUFFIX: &str = "_webhook";

/// Storage key for a site's subscriptions.
#[must_use]
pub fn subscription_key(site_id: &str) -> String {
    format!("{site_id}{SUBSCRIPTION_KEY_SUFFIX}")
}

/// Repository for site subscriptions.
#[derive(Clone)]
pub struct SubscriptionRepo {
    kv: KvStore,
}

impl SubscriptionRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Channel IDs subscribed to `site_id`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the read fails.
    pub async fn channels(&self, site_id: &str) -> Result<Vec<String>> {
        let Some(raw) = self.kv.get(&subscription_key(site_id)).await? else {
            return Ok(Vec::new());
        };
        Ok(String::from_utf8_lossy(&raw)
            .split_whitespace()
            .map(str::to_owned)
            .collect())
    }

    /// Subscribe `channel_id` to `site_id`.
    ///
    /// Returns `false` when the channel was already subscribed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn add(&self, site_id: &str, channel_id: &str) -> Result<bool> {
        self.kv
            .append_member(KvKind::Subscription, &subscription_key(site_id), channel_id)
            .await
    }

    /// Drop every subscription for `site_id`. Returns whether any existed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn remove_site(&self, site_id: &str) -> Result<bool> {
        self.kv.delete(&subscription_key(site_id)).await
    }
}
