//! Integration tests for [`storage::PhotoMemoryStore`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storage::{
    InMemoryKv, KvStore, PhotoEntry, PhotoMemoryStore, StorageError, PHOTO_MEMORY_LIMIT,
};

/// In-memory store whose next `get` fails once `fail_next_get` is set.
#[derive(Default)]
struct FlakyKv {
    inner: InMemoryKv,
    fail_next_get: AtomicBool,
}

#[async_trait]
impl KvStore for FlakyKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_next_get.swap(false, Ordering::SeqCst) {
            return Err(StorageError::Database("connection reset".to_string()));
        }
        self.inner.get(key).await
    }
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError> {
        self.inner.put(key, value, ttl).await
    }
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.inner.list(prefix).await
    }
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }
}

fn entry(n: usize) -> PhotoEntry {
    PhotoEntry::new(format!("tg://file/f{n}"), Some(format!("photo {n}")), None)
}

/// **Test: memory keeps only the newest entries, newest first.**
///
/// **Setup:** Empty memory for user 1.
/// **Action:** Save 25 photos.
/// **Expected:** 20 entries remain, photo 24 first and photo 5 last.
#[tokio::test]
async fn test_save_truncates_to_limit_newest_first() {
    let photos = PhotoMemoryStore::new(Arc::new(InMemoryKv::new()));
    for n in 0..25 {
        photos.save(1, entry(n)).await.unwrap();
    }

    let loaded = photos.load(1).await;
    assert_eq!(loaded.len(), PHOTO_MEMORY_LIMIT);
    assert_eq!(loaded[0].url, "tg://file/f24");
    assert_eq!(loaded[PHOTO_MEMORY_LIMIT - 1].url, "tg://file/f5");
}

#[tokio::test]
async fn test_clear_and_users_are_separate() {
    let photos = PhotoMemoryStore::new(Arc::new(InMemoryKv::new()));
    photos.save(1, entry(1)).await.unwrap();
    photos.save(2, entry(2)).await.unwrap();

    photos.clear(1).await.unwrap();
    assert!(photos.load(1).await.is_empty());
    assert_eq!(photos.load(2).await.len(), 1);
}

#[tokio::test]
async fn test_unreadable_document_loads_empty_and_is_replaced() {
    let kv = Arc::new(InMemoryKv::new());
    kv.put("photos:3", "not json", None).await.unwrap();
    let photos = PhotoMemoryStore::new(kv);

    assert!(photos.load(3).await.is_empty());
    photos.save(3, entry(0)).await.unwrap();
    assert_eq!(photos.load(3).await.len(), 1);
}

/// **Test: A failed read aborts the save instead of wiping the list.**
///
/// **Setup:** Ten saved photos; the store's next read fails.
/// **Action:** Save an eleventh photo.
/// **Expected:** The save errors; all ten photos are still there and a retry succeeds.
#[tokio::test]
async fn test_save_during_read_failure_keeps_existing_entries() {
    let kv = Arc::new(FlakyKv::default());
    let photos = PhotoMemoryStore::new(kv.clone());
    for n in 0..10 {
        photos.save(4, entry(n)).await.unwrap();
    }

    kv.fail_next_get.store(true, Ordering::SeqCst);
    assert!(photos.save(4, entry(10)).await.is_err());
    assert_eq!(photos.load(4).await.len(), 10);

    photos.save(4, entry(10)).await.unwrap();
    let loaded = photos.load(4).await;
    assert_eq!(loaded.len(), 11);
    assert_eq!(loaded[0].url, "tg://file/f10");
}
