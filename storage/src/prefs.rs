//! Per-user preferences.
//!
//! Every field lives under its own key with its own TTL, so fields expire independently: a
//! user can keep a 180-day language while the 1-hour drive flag has long lapsed. Getters never
//! fail; absence, a store error or an unparseable value all read as the field's default.
//! Setters are plain puts with no ordering guarantee between concurrent writers.

use hookbot_core::Lang;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::error::StorageError;
use crate::kv::KvStore;

const DAY: u64 = 24 * 60 * 60;

pub const LANG_TTL: Duration = Duration::from_secs(180 * DAY);
pub const DRIVE_MODE_TTL: Duration = Duration::from_secs(60 * 60);
pub const LEARN_MODE_TTL: Duration = Duration::from_secs(14 * DAY);
pub const AUTOLOG_TTL: Duration = Duration::from_secs(180 * DAY);
pub const LAST_PLACE_TTL: Duration = Duration::from_secs(90 * DAY);

/// Snapshot of all preferences for one user. Fields may come from different points in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPrefs {
    pub lang: Option<Lang>,
    pub drive_mode: bool,
    pub learn_mode: bool,
    pub autolog: bool,
    pub last_place: Option<String>,
}

#[derive(Clone)]
pub struct UserPrefsStore {
    kv: Arc<dyn KvStore>,
}

fn lang_key(id: i64) -> String {
    format!("pref:lang:{id}")
}
fn drive_key(id: i64) -> String {
    format!("pref:drive:{id}")
}
fn learn_key(id: i64) -> String {
    format!("pref:learn:{id}")
}
fn autolog_key(id: i64) -> String {
    format!("pref:autolog:{id}")
}
fn place_key(id: i64) -> String {
    format!("pref:place:{id}")
}

impl UserPrefsStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Preference read failed, using default");
                None
            }
        }
    }

    async fn read_flag(&self, key: &str) -> bool {
        matches!(self.read(key).await.as_deref(), Some("1"))
    }

    async fn write_flag(&self, key: &str, on: bool, ttl: Duration) -> Result<(), StorageError> {
        self.kv.put(key, if on { "1" } else { "0" }, Some(ttl)).await
    }

    /// Stored language, if any. Callers fall back to the client's language, then English.
    pub async fn get_lang(&self, user_id: i64) -> Option<Lang> {
        self.read(&lang_key(user_id))
            .await
            .and_then(|code| Lang::parse(&code))
    }

    /// Reply language: stored preference, else the client's language tag, else English.
    pub async fn reply_lang(&self, user_id: i64, client_code: Option<&str>) -> Lang {
        match self.get_lang(user_id).await {
            Some(lang) => lang,
            None => client_code.map(Lang::from_code).unwrap_or_default(),
        }
    }

    pub async fn set_lang(&self, user_id: i64, lang: Lang) -> Result<(), StorageError> {
        self.kv
            .put(&lang_key(user_id), lang.code(), Some(LANG_TTL))
            .await
    }

    pub async fn get_drive_mode(&self, user_id: i64) -> bool {
        self.read_flag(&drive_key(user_id)).await
    }

    pub async fn set_drive_mode(&self, user_id: i64, on: bool) -> Result<(), StorageError> {
        self.write_flag(&drive_key(user_id), on, DRIVE_MODE_TTL).await
    }

    pub async fn get_learn_mode(&self, user_id: i64) -> bool {
        self.read_flag(&learn_key(user_id)).await
    }

    pub async fn set_learn_mode(&self, user_id: i64, on: bool) -> Result<(), StorageError> {
        self.write_flag(&learn_key(user_id), on, LEARN_MODE_TTL).await
    }

    pub async fn get_autolog(&self, user_id: i64) -> bool {
        self.read_flag(&autolog_key(user_id)).await
    }

    pub async fn set_autolog(&self, user_id: i64, on: bool) -> Result<(), StorageError> {
        self.write_flag(&autolog_key(user_id), on, AUTOLOG_TTL).await
    }

    pub async fn get_last_place(&self, user_id: i64) -> Option<String> {
        self.read(&place_key(user_id))
            .await
            .filter(|p| !p.trim().is_empty())
    }

    pub async fn set_last_place(&self, user_id: i64, place: &str) -> Result<(), StorageError> {
        self.kv
            .put(&place_key(user_id), place.trim(), Some(LAST_PLACE_TTL))
            .await
    }

    /// Reads every field. Each read is independent; missing fields take their defaults.
    pub async fn load(&self, user_id: i64) -> UserPrefs {
        UserPrefs {
            lang: self.get_lang(user_id).await,
            drive_mode: self.get_drive_mode(user_id).await,
            learn_mode: self.get_learn_mode(user_id).await,
            autolog: self.get_autolog(user_id).await,
            last_place: self.get_last_place(user_id).await,
        }
    }
}
