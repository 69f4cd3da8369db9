//! Per-chat checklist stored as one JSON document.
//!
//! Every mutation reads the whole list, changes it in memory and writes it back, so concurrent
//! mutations of the same chat may lose one of the edits. Item ids come from a separate counter
//! key bumped with [`KvStore::increment`]; they are never reused, even after `clear`.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::models::ChecklistItem;

pub const EMPTY_CHECKLIST_TEXT: &str = "Checklist is empty.";

#[derive(Clone)]
pub struct ChecklistStore {
    kv: Arc<dyn KvStore>,
}

fn list_key(chat_id: i64) -> String {
    format!("checklist:{chat_id}")
}

fn seq_key(chat_id: i64) -> String {
    format!("checklist:{chat_id}:seq")
}

impl ChecklistStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Items in stored order. A missing document is an empty list; an unreadable one is an error.
    pub async fn get(&self, chat_id: i64) -> Result<Vec<ChecklistItem>, StorageError> {
        let key = list_key(chat_id);
        match self.kv.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key,
                reason: e.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, chat_id: i64, items: &[ChecklistItem]) -> Result<(), StorageError> {
        let doc = serde_json::to_string(items)?;
        self.kv.put(&list_key(chat_id), &doc, None).await
    }

    /// Appends a new open item and returns it.
    pub async fn add_item(
        &self,
        chat_id: i64,
        text: &str,
        author_id: i64,
    ) -> Result<ChecklistItem, StorageError> {
        let id = self.kv.increment(&seq_key(chat_id)).await?;
        let item = ChecklistItem {
            id,
            text: text.trim().to_string(),
            done: false,
            ts: Utc::now().timestamp_millis(),
            author_id,
        };

        let mut items = self.get(chat_id).await?;
        items.push(item.clone());
        self.write(chat_id, &items).await?;

        info!(chat_id = chat_id, item_id = id, "Checklist item added");
        Ok(item)
    }

    /// Flips `done` on the item. Returns the updated item, or `None` when no such id exists.
    pub async fn mark_done(
        &self,
        chat_id: i64,
        item_id: i64,
    ) -> Result<Option<ChecklistItem>, StorageError> {
        let mut items = self.get(chat_id).await?;
        let Some(item) = items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(None);
        };
        item.done = !item.done;
        let updated = item.clone();
        self.write(chat_id, &items).await?;
        Ok(Some(updated))
    }

    /// Removes the item. Returns false when no such id exists.
    pub async fn remove_item(&self, chat_id: i64, item_id: i64) -> Result<bool, StorageError> {
        let mut items = self.get(chat_id).await?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(chat_id, &items).await?;
        Ok(true)
    }

    /// Empties the list. The id counter is left alone.
    pub async fn clear(&self, chat_id: i64) -> Result<(), StorageError> {
        self.write(chat_id, &[]).await?;
        info!(chat_id = chat_id, "Checklist cleared");
        Ok(())
    }

    /// Renders the list sorted by id.
    pub async fn to_markdown(&self, chat_id: i64) -> Result<String, StorageError> {
        let items = self.get(chat_id).await?;
        Ok(render_markdown(items))
    }
}

pub(crate) fn render_markdown(mut items: Vec<ChecklistItem>) -> String {
    if items.is_empty() {
        return EMPTY_CHECKLIST_TEXT.to_string();
    }
    items.sort_by_key(|i| i.id);
    if items.windows(2).any(|w| w[0].id == w[1].id) {
        warn!("Checklist contains duplicate ids");
    }
    items
        .iter()
        .map(|i| {
            let mark = if i.done { "x" } else { " " };
            format!("{}. [{}] {}", i.id, mark, i.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
