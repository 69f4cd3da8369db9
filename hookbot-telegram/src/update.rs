//! Webhook update payload. Only the fields the bot reads are modelled; everything else in the
//! JSON is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub edited_message: Option<TgMessage>,
}

impl Update {
    /// The message carried by the update: a new message, else an edited one.
    ///
    /// Edited commands are dropped. Fixing a typo in `/todo milk` must not add the item again.
    pub fn message(&self) -> Option<&TgMessage> {
        if let Some(message) = &self.message {
            return Some(message);
        }
        self.edited_message.as_ref().filter(|m| !m.is_command())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgChat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub file_id: String,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub date: Option<i64>,
    pub text: Option<String>,
    pub caption: Option<String>,
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    pub voice: Option<Voice>,
    pub document: Option<Document>,
}

impl TgMessage {
    pub fn is_command(&self) -> bool {
        self.text
            .as_deref()
            .is_some_and(|t| t.trim_start().starts_with('/'))
    }
}
