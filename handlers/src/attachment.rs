//! Photos, voice notes and documents.
//!
//! With drive mode on, the file is fetched from Telegram and uploaded to Drive. Otherwise photos
//! go to the sender's photo memory (with a vision description when an LLM is configured) and
//! other files get a hint about drive mode.

use async_trait::async_trait;
use hookbot_core::{
    Attachment, AttachmentKind, ChatAction, Handler, HandlerResponse, Message, Result,
};
use std::sync::Arc;
use storage::PhotoEntry;
use tracing::{info, instrument, warn};

use crate::services::Services;

pub struct AttachmentHandler {
    services: Arc<Services>,
}

fn default_name(attachment: &Attachment, update_id: i64) -> String {
    match attachment.kind {
        AttachmentKind::Photo => format!("photo-{update_id}.jpg"),
        AttachmentKind::Voice => format!("voice-{update_id}.ogg"),
        AttachmentKind::Document => format!("document-{update_id}"),
    }
}

fn default_mime(kind: AttachmentKind) -> &'static str {
    match kind {
        AttachmentKind::Photo => "image/jpeg",
        AttachmentKind::Voice => "audio/ogg",
        AttachmentKind::Document => "application/octet-stream",
    }
}

impl AttachmentHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    async fn save_to_drive(&self, message: &Message, attachment: &Attachment) -> HandlerResponse {
        let s = &self.services;
        let t = s.texts(message).await;
        let Some(drive) = &s.drive else {
            return s.reply(message, t.drive_not_connected).await;
        };
        s.chat_action(message, ChatAction::UploadDocument).await;

        let bytes = match s.bot.download_file(&attachment.file_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to download attachment");
                return s.reply(message, t.unavailable).await;
            }
        };
        let name = attachment
            .file_name
            .clone()
            .unwrap_or_else(|| default_name(attachment, message.update_id));
        let mime = attachment
            .mime_type
            .as_deref()
            .unwrap_or(default_mime(attachment.kind));

        match drive.upload(&name, mime, bytes).await {
            Ok(file) => {
                info!(file_id = %file.id, "Attachment saved to Drive");
                let link = file.web_view_link.unwrap_or_default();
                s.reply(message, format!("{} {}\n{}", t.drive_saved, file.name, link).trim_end().to_string())
                    .await
            }
            Err(e) => {
                warn!(error = %e, "Drive upload failed");
                s.reply(message, t.unavailable).await
            }
        }
    }

    async fn remember_photo(&self, message: &Message, attachment: &Attachment) -> HandlerResponse {
        let s = &self.services;
        let t = s.texts(message).await;
        let caption = Some(message.content.trim().to_string()).filter(|c| !c.is_empty());

        let desc = match &s.llm {
            Some(llm) => match s.bot.download_file(&attachment.file_id).await {
                Ok(bytes) => {
                    let mime = attachment.mime_type.as_deref().unwrap_or("image/jpeg");
                    match llm.describe_image(&bytes, mime, caption.as_deref()).await {
                        Ok(desc) => Some(desc).filter(|d| !d.trim().is_empty()),
                        Err(e) => {
                            warn!(error = %e, "Vision description failed");
                            None
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to download photo for description");
                    None
                }
            },
            None => None,
        };

        let url = format!("tg://file/{}", attachment.file_id);
        let entry = PhotoEntry::new(url, caption, desc.clone());
        if let Err(e) = s.photos.save(message.user.id, entry).await {
            warn!(error = %e, "Failed to save photo memory");
            return s.reply(message, t.unavailable).await;
        }
        match desc {
            Some(desc) => s.reply(message, format!("{}\n\n{}", t.photo_saved, desc)).await,
            None => s.reply(message, t.photo_saved).await,
        }
    }
}

#[async_trait]
impl Handler for AttachmentHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(attachment) = &message.attachment else {
            return Ok(HandlerResponse::Continue);
        };
        let s = &self.services;

        if s.prefs.get_drive_mode(message.user.id).await {
            return Ok(self.save_to_drive(message, attachment).await);
        }
        if attachment.kind == AttachmentKind::Photo {
            return Ok(self.remember_photo(message, attachment).await);
        }
        let t = s.texts(message).await;
        Ok(s.reply(message, t.attachment_hint).await)
    }
}
