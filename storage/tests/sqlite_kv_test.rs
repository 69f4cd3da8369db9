//! Integration tests for [`storage::SqliteKv`] against a file database in a temp dir.

use std::sync::Arc;
use std::time::Duration;

use storage::{KvStore, SqliteKv, StorageError};
use tempfile::TempDir;

async fn open() -> (SqliteKv, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("kv.db");
    let kv = SqliteKv::new(path.to_str().expect("utf8 path"))
        .await
        .expect("open sqlite kv");
    (kv, dir)
}

/// **Test: put / get / overwrite / delete.**
///
/// **Setup:** Fresh file database.
/// **Action:** Put a key twice, read it, delete it.
/// **Expected:** Reads see the latest value; after delete the key is absent.
#[tokio::test]
async fn test_put_get_overwrite_delete() {
    let (kv, _dir) = open().await;

    assert!(kv.get("a").await.unwrap().is_none());
    kv.put("a", "1", None).await.unwrap();
    kv.put("a", "2", None).await.unwrap();
    assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("2"));

    kv.delete("a").await.unwrap();
    assert!(kv.get("a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_value_is_invisible_and_purged() {
    let (kv, _dir) = open().await;

    kv.put("short", "x", Some(Duration::from_millis(20)))
        .await
        .unwrap();
    kv.put("long", "y", Some(Duration::from_secs(60)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(kv.get("short").await.unwrap().is_none());
    assert_eq!(kv.get("long").await.unwrap().as_deref(), Some("y"));
    assert_eq!(kv.purge_expired().await.unwrap(), 1);
}

/// **Test: list only returns keys under the prefix, sorted.**
///
/// **Setup:** Keys for chats 1, 10 and 2 under the same namespace.
/// **Action:** `list("brain:1:")`.
/// **Expected:** Only chat 1 keys; `brain:10:` does not leak in.
#[tokio::test]
async fn test_list_by_prefix() {
    let (kv, _dir) = open().await;
    for key in ["brain:1:b", "brain:1:a", "brain:10:a", "brain:2:a"] {
        kv.put(key, "{}", None).await.unwrap();
    }

    let keys = kv.list("brain:1:").await.unwrap();
    assert_eq!(keys, vec!["brain:1:a", "brain:1:b"]);
}

#[tokio::test]
async fn test_put_if_absent_writes_once_until_expiry() {
    let (kv, _dir) = open().await;
    let ttl = Some(Duration::from_millis(30));

    assert!(kv.put_if_absent("dedup:7", "1", ttl).await.unwrap());
    assert!(!kv.put_if_absent("dedup:7", "1", ttl).await.unwrap());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(kv.put_if_absent("dedup:7", "1", ttl).await.unwrap());
}

#[tokio::test]
async fn test_increment_and_corrupt_counter() {
    let (kv, _dir) = open().await;

    assert_eq!(kv.increment("seq").await.unwrap(), 1);
    assert_eq!(kv.increment("seq").await.unwrap(), 2);
    assert_eq!(kv.get("seq").await.unwrap().as_deref(), Some("2"));

    kv.put("bad", "twelve", None).await.unwrap();
    let err = kv.increment("bad").await.unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
    assert_eq!(kv.get("bad").await.unwrap().as_deref(), Some("twelve"));
}

/// **Test: concurrent increments through the pool never hand out the same value.**
#[tokio::test]
async fn test_concurrent_increments_are_unique() {
    let (kv, _dir) = open().await;
    let kv = Arc::new(kv);

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let kv = kv.clone();
        tasks.push(tokio::spawn(async move { kv.increment("seq").await.unwrap() }));
    }
    let mut ids = Vec::new();
    for t in tasks {
        ids.push(t.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_in_memory_url_keeps_state_across_calls() {
    let kv = SqliteKv::new("sqlite::memory:").await.unwrap();
    kv.put("k", "v", None).await.unwrap();
    assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));
}
