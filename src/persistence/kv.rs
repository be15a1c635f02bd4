//! Flat key-value store backed by the `kv` table.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::Result;

use super::db::Database;

/// Category of a key-value record.
///
/// Lets maintenance tasks target one kind of record without parsing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvKind {
    /// Encrypted Netlify access token for a user.
    Token,
    /// Single-use anti-CSRF state issued for an OAuth round-trip.
    OAuthState,
    /// Channel list subscribed to a site's build notifications.
    Subscription,
}

impl KvKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::OAuthState => "oauth_state",
            Self::Subscription => "subscription",
        }
    }
}

// Fixed-width UTC timestamps keep lexical and chronological order aligned.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Thin wrapper over the `kv` table.
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    /// Create a new store instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = sqlx::query_scalar("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(self.db.as_ref())
            .await?;
        Ok(value)
    }

    /// Fetch the value stored under `key` if it is a record of `kind`
    /// written at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get_kind_since(
        &self,
        kind: KvKind,
        key: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = sqlx::query_scalar(
            "SELECT value FROM kv WHERE key = ?1 AND kind = ?2 AND updated_at >= ?3",
        )
        .bind(key)
        .bind(kind.as_str())
        .bind(timestamp(since))
        .fetch_optional(self.db.as_ref())
        .await?;
        Ok(value)
    }

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the upsert fails.
    pub async fn set(&self, kind: KvKind, key: &str, value: &[u8]) -> Result<()> {
        let now = timestamp(Utc::now());
        sqlx::query(
            "INSERT INTO kv (key, kind, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET kind = excluded.kind,
                 value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(kind.as_str())
        .bind(value)
        .bind(&now)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Append `member` to the space-separated list stored under `key`.
    ///
    /// The read and the write happen in one statement, so concurrent
    /// appends to the same key never overwrite each other. Returns `false`
    /// when `member` is already in the list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the upsert fails.
    pub async fn append_member(&self, kind: KvKind, key: &str, member: &str) -> Result<bool> {
        let now = timestamp(Utc::now());
        let result = sqlx::query(
            "INSERT INTO kv (key, kind, value, updated_at) VALUES (?1, ?2, CAST(?3 AS BLOB), ?4)
             ON CONFLICT(key) DO UPDATE SET
                 value = CAST(trim(CAST(kv.value AS TEXT) || ' ' || ?3) AS BLOB),
                 updated_at = excluded.updated_at
             WHERE instr(' ' || CAST(kv.value AS TEXT) || ' ', ' ' || ?3 || ' ') = 0",
        )
        .bind(key)
        .bind(kind.as_str())
        .bind(member)
        .bind(&now)
        .execute(self.db.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete `key`. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(self.db.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete `key` only if it is a record of `kind`. Returns whether a
    /// record was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete_kind(&self, kind: KvKind, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv WHERE key = ?1 AND kind = ?2")
            .bind(key)
            .bind(kind.as_str())
            .execute(self.db.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record of `kind` last written before `before`.
    ///
    /// Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn purge_kind_before(&self, kind: KvKind, before: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM kv WHERE kind = ?1 AND updated_at < ?2")
            .bind(kind.as_str())
            .bind(timestamp(before))
            .execute(self.db.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
