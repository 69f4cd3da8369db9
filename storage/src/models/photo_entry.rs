//! One remembered photo.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub id: String,
    /// Transport reference to the file (`tg://file/<file_id>`), never a tokenized download URL.
    pub url: String,
    pub caption: Option<String>,
    /// Vision description, when one was produced.
    pub desc: Option<String>,
    /// Unix milliseconds.
    pub ts: i64,
}

impl PhotoEntry {
    /// Creates an entry with a generated id and the current timestamp.
    pub fn new(url: String, caption: Option<String>, desc: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            caption,
            desc,
            ts: Utc::now().timestamp_millis(),
        }
    }
}
