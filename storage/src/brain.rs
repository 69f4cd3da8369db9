//! Brain notes: short texts remembered per chat and recalled as context for AI answers.
//!
//! Each note is its own key, `brain:{chat}:{ts_ms}-{uuid8}`, so listing by prefix returns
//! notes oldest first and writes never contend. Recall is a plain word-overlap score.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::models::{BrainNote, NoteSource};

pub const BRAIN_NOTE_TTL: Duration = Duration::from_secs(180 * 24 * 60 * 60);

/// Words shorter than this do not count towards recall.
const MIN_WORD_LEN: usize = 3;

#[derive(Clone)]
pub struct BrainStore {
    kv: Arc<dyn KvStore>,
}

fn prefix(chat_id: i64) -> String {
    format!("brain:{chat_id}:")
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .map(|w| w.to_lowercase())
        .collect()
}

impl BrainStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn remember(
        &self,
        chat_id: i64,
        text: &str,
        source: NoteSource,
    ) -> Result<BrainNote, StorageError> {
        let ts = Utc::now().timestamp_millis();
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let note = BrainNote {
            id: format!("{ts}-{suffix}"),
            text: text.trim().to_string(),
            ts,
            source,
        };
        let key = format!("{}{}", prefix(chat_id), note.id);
        self.kv
            .put(&key, &serde_json::to_string(&note)?, Some(BRAIN_NOTE_TTL))
            .await?;
        debug!(chat_id = chat_id, note_id = %note.id, "Brain note stored");
        Ok(note)
    }

    /// All live notes, oldest first. Unreadable entries are skipped.
    pub async fn list(&self, chat_id: i64) -> Result<Vec<BrainNote>, StorageError> {
        let keys = self.kv.list(&prefix(chat_id)).await?;
        let mut notes = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.kv.get(&key).await? else {
                continue;
            };
            match serde_json::from_str::<BrainNote>(&raw) {
                Ok(note) => notes.push(note),
                Err(e) => warn!(key = %key, error = %e, "Skipping unreadable brain note"),
            }
        }
        Ok(notes)
    }

    pub async fn count(&self, chat_id: i64) -> Result<usize, StorageError> {
        Ok(self.kv.list(&prefix(chat_id)).await?.len())
    }

    /// Up to `limit` notes sharing the most words with `query`, best first.
    /// Ties go to the newer note. Notes with no overlap are never returned.
    pub async fn recall(
        &self,
        chat_id: i64,
        query: &str,
        limit: usize,
    ) -> Result<Vec<BrainNote>, StorageError> {
        let query_words = words(query);
        if query_words.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, BrainNote)> = self
            .list(chat_id)
            .await?
            .into_iter()
            .filter_map(|note| {
                let score = words(&note.text).intersection(&query_words).count();
                (score > 0).then_some((score, note))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.ts.cmp(&a.1.ts)));
        Ok(scored.into_iter().take(limit).map(|(_, n)| n).collect())
    }

    /// Deletes every note of the chat. Returns how many were removed.
    pub async fn forget_all(&self, chat_id: i64) -> Result<usize, StorageError> {
        let keys = self.kv.list(&prefix(chat_id)).await?;
        for key in &keys {
            self.kv.delete(key).await?;
        }
        info!(chat_id = chat_id, removed = keys.len(), "Brain notes forgotten");
        Ok(keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::words;

    #[test]
    fn test_words_lowercases_and_drops_short_tokens() {
        let w = words("My WiFi password is on the fridge!");
        assert!(w.contains("wifi"));
        assert!(w.contains("fridge"));
        assert!(!w.contains("is"));
        assert!(!w.contains("my"));
    }
}
