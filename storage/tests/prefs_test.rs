//! Integration tests for [`storage::UserPrefsStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hookbot_core::Lang;
use storage::{InMemoryKv, KvStore, StorageError, UserPrefs, UserPrefsStore};

/// Store whose every call fails, for checking that getters degrade to defaults.
struct BrokenKv;

#[async_trait]
impl KvStore for BrokenKv {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Database("unavailable".into()))
    }
    async fn put(&self, _k: &str, _v: &str, _t: Option<Duration>) -> Result<(), StorageError> {
        Err(StorageError::Database("unavailable".into()))
    }
    async fn list(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Database("unavailable".into()))
    }
    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Database("unavailable".into()))
    }
}

#[tokio::test]
async fn test_defaults_when_nothing_stored() {
    let prefs = UserPrefsStore::new(Arc::new(InMemoryKv::new()));
    assert_eq!(prefs.load(1).await, UserPrefs::default());
}

#[tokio::test]
async fn test_set_and_get_each_field() {
    let prefs = UserPrefsStore::new(Arc::new(InMemoryKv::new()));
    prefs.set_lang(1, Lang::Uk).await.unwrap();
    prefs.set_drive_mode(1, true).await.unwrap();
    prefs.set_learn_mode(1, true).await.unwrap();
    prefs.set_autolog(1, false).await.unwrap();
    prefs.set_last_place(1, "  Kyiv ").await.unwrap();

    let loaded = prefs.load(1).await;
    assert_eq!(loaded.lang, Some(Lang::Uk));
    assert!(loaded.drive_mode);
    assert!(loaded.learn_mode);
    assert!(!loaded.autolog);
    assert_eq!(loaded.last_place.as_deref(), Some("Kyiv"));

    // Other users are untouched.
    assert_eq!(prefs.load(2).await, UserPrefs::default());
}

#[tokio::test(start_paused = true)]
async fn test_drive_mode_expires_before_language() {
    let prefs = UserPrefsStore::new(Arc::new(InMemoryKv::new()));
    prefs.set_lang(1, Lang::Ru).await.unwrap();
    prefs.set_drive_mode(1, true).await.unwrap();

    tokio::time::advance(Duration::from_secs(60 * 60 + 1)).await;

    assert!(!prefs.get_drive_mode(1).await);
    assert_eq!(prefs.get_lang(1).await, Some(Lang::Ru));
}

#[tokio::test]
async fn test_unparseable_lang_reads_as_absent() {
    let kv = Arc::new(InMemoryKv::new());
    kv.put("pref:lang:1", "klingon", None).await.unwrap();
    let prefs = UserPrefsStore::new(kv);
    assert_eq!(prefs.get_lang(1).await, None);
}

#[tokio::test]
async fn test_store_failure_degrades_reads_and_surfaces_writes() {
    let prefs = UserPrefsStore::new(Arc::new(BrokenKv));
    assert_eq!(prefs.load(1).await, UserPrefs::default());
    assert!(prefs.set_drive_mode(1, true).await.is_err());
}
