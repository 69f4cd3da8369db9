//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.

mod logging_middleware_test;

use async_trait::async_trait;
use chrono::Utc;
use hookbot_core::{Bot, Chat, ChatAction, Message, MessageDirection, Result, User};
use std::sync::Mutex;

/// Records every text sent; other calls succeed silently.
#[derive(Default)]
pub(crate) struct RecordingBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingBot {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
    async fn send_chat_action(&self, _chat: &Chat, _action: ChatAction) -> Result<()> {
        Ok(())
    }
    async fn send_voice(&self, _chat: &Chat, _audio: Vec<u8>, _caption: Option<&str>) -> Result<()> {
        Ok(())
    }
    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

pub(crate) fn sample_message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        update_id: 1,
        user: User {
            id: chat_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            language_code: Some("en".to_string()),
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        attachment: None,
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}
