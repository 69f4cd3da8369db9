//! SQLite-backed [`KvStore`].
//!
//! One `kv` table; expiry is an absolute unix-millisecond column checked on read, so expired rows
//! are invisible before `purge_expired` removes them. `put_if_absent` and `increment` are single
//! upsert statements and therefore atomic across connections.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::kv::{parse_counter, KvStore};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteKv {
    pool_manager: SqlitePoolManager,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn expires_at(ttl: Option<Duration>) -> Option<i64> {
    ttl.map(|t| now_ms().saturating_add(i64::try_from(t.as_millis()).unwrap_or(i64::MAX)))
}

impl SqliteKv {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let kv = Self { pool_manager };
        kv.init().await?;
        Ok(kv)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating kv table if not exist");
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                expires_at INTEGER
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_kv_expires_at ON kv(expires_at)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Deletes expired rows. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM kv WHERE expires_at IS NOT NULL AND expires_at <= ?")
            .bind(now_ms())
            .execute(self.pool_manager.pool())
            .await?;
        info!(removed = result.rows_affected(), "Purged expired kv rows");
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl KvStore for SqliteKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT value FROM kv WHERE key = ? AND (expires_at IS NULL OR expires_at > ?)",
        )
        .bind(key)
        .bind(now_ms())
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(row.map(|r| r.0))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, expires_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(expires_at(ttl))
        .execute(self.pool_manager.pool())
        .await?;
        debug!(key = %key, "kv put");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT key FROM kv
            WHERE substr(key, 1, length(?)) = ? AND (expires_at IS NULL OR expires_at > ?)
            ORDER BY key
            "#,
        )
        .bind(prefix)
        .bind(prefix)
        .bind(now_ms())
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO kv (key, value, expires_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at
            WHERE kv.expires_at IS NOT NULL AND kv.expires_at <= ?
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(expires_at(ttl))
        .bind(now_ms())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn increment(&self, key: &str) -> Result<i64, StorageError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            INSERT INTO kv (key, value, expires_at) VALUES (?, '1', NULL)
            ON CONFLICT(key) DO UPDATE
                SET value = CAST(CAST(kv.value AS INTEGER) + 1 AS TEXT), expires_at = NULL
                WHERE CAST(CAST(kv.value AS INTEGER) AS TEXT) = kv.value
            RETURNING value
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        match row {
            Some((value,)) => parse_counter(key, &value),
            None => Err(StorageError::Corrupt {
                key: key.to_string(),
                reason: "counter is not an integer".to_string(),
            }),
        }
    }
}
