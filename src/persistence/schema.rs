//! `SQLite` schema bootstrap logic.
//!
//! All definitions use `IF NOT EXISTS`, so this is safe to re-run on every
//! startup.

use sqlx::SqlitePool;

use crate::Result;

/// Apply the key-value table definition to the connected database.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY NOT NULL,
    kind        TEXT NOT NULL CHECK(kind IN ('token','oauth_state','subscription')),
    value       BLOB NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_kv_kind_updated ON kv(kind, updated_at);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
