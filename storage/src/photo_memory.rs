//! Bounded per-user photo memory, newest first.
//!
//! `save` is read-modify-write over one JSON document. Two concurrent saves for the same user
//! can both read the old list and the later write wins, dropping the other's entry. That is
//! accepted for a best-effort memory and no locking is attempted.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::models::PhotoEntry;

pub const PHOTO_MEMORY_LIMIT: usize = 20;
pub const PHOTO_MEMORY_TTL: Duration = Duration::from_secs(180 * 24 * 60 * 60);

#[derive(Clone)]
pub struct PhotoMemoryStore {
    kv: Arc<dyn KvStore>,
}

fn photos_key(user_id: i64) -> String {
    format!("photos:{user_id}")
}

impl PhotoMemoryStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Newest-first entries; empty on absence, store error or an unreadable document.
    pub async fn load(&self, user_id: i64) -> Vec<PhotoEntry> {
        self.read(user_id).await.unwrap_or_else(|e| {
            warn!(user_id = user_id, error = %e, "Photo memory read failed");
            Vec::new()
        })
    }

    /// Store errors propagate. An unreadable document reads as empty and is replaced on the
    /// next save.
    async fn read(&self, user_id: i64) -> Result<Vec<PhotoEntry>, StorageError> {
        let Some(raw) = self.kv.get(&photos_key(user_id)).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(user_id = user_id, error = %e, "Photo memory document unreadable, treating as empty");
            Vec::new()
        }))
    }

    /// Prepends `entry` and keeps the newest [`PHOTO_MEMORY_LIMIT`] entries. A failed read
    /// aborts the save so the stored list is never overwritten from a blank.
    pub async fn save(&self, user_id: i64, entry: PhotoEntry) -> Result<(), StorageError> {
        let mut entries = self.read(user_id).await?;
        entries.insert(0, entry);
        entries.truncate(PHOTO_MEMORY_LIMIT);
        let doc = serde_json::to_string(&entries)?;
        self.kv
            .put(&photos_key(user_id), &doc, Some(PHOTO_MEMORY_TTL))
            .await?;
        info!(user_id = user_id, count = entries.len(), "Photo memory saved");
        Ok(())
    }

    pub async fn clear(&self, user_id: i64) -> Result<(), StorageError> {
        self.kv
            .put(&photos_key(user_id), "[]", Some(PHOTO_MEMORY_TTL))
            .await
    }
}
