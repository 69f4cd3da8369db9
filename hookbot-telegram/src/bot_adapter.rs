//! Wraps teloxide::Bot and implements [`hookbot_core::Bot`]. Production code talks to Telegram
//! through it; tests substitute another Bot impl.

use async_trait::async_trait;
use hookbot_core::{Bot as CoreBot, BotError, Chat, ChatAction, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatAction as TgChatAction, ChatId, FileId, InputFile};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements hookbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

fn bot_error(e: impl std::fmt::Display) -> BotError {
    BotError::Bot(e.to_string())
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()> {
        let action = match action {
            ChatAction::Typing => TgChatAction::Typing,
            ChatAction::RecordVoice => TgChatAction::RecordVoice,
            ChatAction::UploadDocument => TgChatAction::UploadDocument,
        };
        self.bot
            .send_chat_action(ChatId(chat.id), action)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_voice(&self, chat: &Chat, audio: Vec<u8>, caption: Option<&str>) -> Result<()> {
        let file = InputFile::memory(audio).file_name("voice.ogg");
        let request = self.bot.send_voice(ChatId(chat.id), file);
        let sent = match caption {
            Some(caption) => request.caption(caption.to_string()).await,
            None => request.await,
        };
        sent.map_err(bot_error)?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_error)?;
        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(bot_error)?;
        debug!(file_id, bytes = buf.len(), "Downloaded file from Telegram");
        Ok(buf)
    }
}
