//! Learn mode and autolog: plain text becomes brain notes.
//!
//! Learn mode answers each note and ends routing. Autolog stores quietly and lets the message
//! continue to intents and the AI.

use async_trait::async_trait;
use hookbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use storage::NoteSource;
use tracing::{debug, instrument, warn};

use crate::services::Services;

pub struct CaptureHandler {
    services: Arc<Services>,
}

impl CaptureHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Handler for CaptureHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() || message.is_command() || message.attachment.is_some() {
            return Ok(HandlerResponse::Continue);
        }
        let s = &self.services;
        let user_id = message.user.id;

        if s.prefs.get_learn_mode(user_id).await {
            let t = s.texts(message).await;
            return Ok(match s.brain.remember(message.chat.id, text, NoteSource::Learn).await {
                Ok(_) => s.reply(message, t.learned).await,
                Err(e) => {
                    warn!(error = %e, "Failed to store learned note");
                    s.reply(message, t.unavailable).await
                }
            });
        }

        if s.prefs.get_autolog(user_id).await {
            match s.brain.remember(message.chat.id, text, NoteSource::Autolog).await {
                Ok(note) => debug!(note_id = %note.id, "Autologged"),
                Err(e) => warn!(error = %e, "Failed to autolog note"),
            }
        }
        Ok(HandlerResponse::Continue)
    }
}
