//! A remembered note used as retrieval context.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSource {
    Learn,
    Autolog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainNote {
    /// Key suffix under the chat's brain prefix.
    pub id: String,
    pub text: String,
    /// Unix milliseconds.
    pub ts: i64,
    pub source: NoteSource,
}
