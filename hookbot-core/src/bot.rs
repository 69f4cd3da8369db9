//! Bot abstraction for outbound calls.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in hookbot-telegram and tests
//! substitute a recording mock.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Chat action shown to the user while a reply is being prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    RecordVoice,
    UploadDocument,
}

/// Outbound operations against the chat platform. Every call is independent; callers treat failures as best-effort.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    /// Shows a chat action ("typing…").
    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()>;
    /// Sends an audio voice note (OGG/Opus or MP3 bytes).
    async fn send_voice(&self, chat: &Chat, audio: Vec<u8>, caption: Option<&str>) -> Result<()>;
    /// Downloads a file previously received in an update.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
