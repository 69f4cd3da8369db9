//! One checklist item.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Issued by the checklist sequence counter; never reused.
    pub id: i64,
    pub text: String,
    pub done: bool,
    /// Unix milliseconds.
    pub ts: i64,
    pub author_id: i64,
}
