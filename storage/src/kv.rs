//! Key-value contract shared by every piece of bot state.
//!
//! The required surface is deliberately small (get / put with TTL / list by prefix / delete) so any
//! eventually-consistent store fits. `put_if_absent` and `increment` have check-then-set defaults
//! built from `get` + `put`; those defaults race under concurrent callers. Implementations with
//! conditional writes override them.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::StorageError;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes the value; `ttl = None` keeps it until overwritten or deleted.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError>;

    /// Lists live keys starting with `prefix`, in ascending key order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Writes only when no live value exists. Returns true when this call wrote.
    async fn put_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StorageError> {
        if self.get(key).await?.is_some() {
            return Ok(false);
        }
        self.put(key, value, ttl).await?;
        Ok(true)
    }

    /// Increments a decimal counter (absent counts as 0) and returns the new value. No TTL.
    async fn increment(&self, key: &str) -> Result<i64, StorageError> {
        let current = match self.get(key).await? {
            Some(raw) => parse_counter(key, &raw)?,
            None => 0,
        };
        let next = current + 1;
        self.put(key, &next.to_string(), None).await?;
        Ok(next)
    }
}

pub(crate) fn parse_counter(key: &str, raw: &str) -> Result<i64, StorageError> {
    raw.trim().parse::<i64>().map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: format!("counter is not an integer ({e})"),
    })
}
