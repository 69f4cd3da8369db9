//! Adapters from Telegram webhook types to hookbot_core types.

use chrono::{DateTime, Utc};
use hookbot_core::{
    Attachment, AttachmentKind, Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};

use crate::update::{TgMessage, TgUser};

/// Wraps a Telegram user for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a TgUser);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()).filter(|n| !n.is_empty()),
            last_name: self.0.last_name.clone(),
            language_code: self.0.language_code.clone(),
        }
    }
}

/// Wraps a Telegram message (with the id of the update carrying it) for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a> {
    pub update_id: i64,
    pub message: &'a TgMessage,
}

impl<'a> TelegramMessageWrapper<'a> {
    pub fn new(update_id: i64, message: &'a TgMessage) -> Self {
        Self { update_id, message }
    }

    /// Largest photo size, then voice, then document.
    fn attachment(&self) -> Option<Attachment> {
        let m = self.message;
        if let Some(photo) = m.photo.iter().max_by_key(|p| u64::from(p.width) * u64::from(p.height)) {
            return Some(Attachment {
                kind: AttachmentKind::Photo,
                file_id: photo.file_id.clone(),
                file_name: None,
                mime_type: Some("image/jpeg".to_string()),
            });
        }
        if let Some(voice) = &m.voice {
            return Some(Attachment {
                kind: AttachmentKind::Voice,
                file_id: voice.file_id.clone(),
                file_name: None,
                mime_type: voice.mime_type.clone(),
            });
        }
        m.document.as_ref().map(|doc| Attachment {
            kind: AttachmentKind::Document,
            file_id: doc.file_id.clone(),
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.clone(),
        })
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let m = self.message;
        let attachment = self.attachment();
        let message_type = match attachment.as_ref().map(|a| a.kind) {
            Some(AttachmentKind::Photo) => "photo",
            Some(AttachmentKind::Voice) => "voice",
            Some(AttachmentKind::Document) => "document",
            None => "text",
        };
        Message {
            id: m.message_id.to_string(),
            update_id: self.update_id,
            user: m
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: m.chat.id,
                    username: None,
                    first_name: None,
                    last_name: None,
                    language_code: None,
                }),
            chat: Chat {
                id: m.chat.id,
                chat_type: m.chat.chat_type.clone(),
            },
            content: m
                .text
                .as_deref()
                .or(m.caption.as_deref())
                .unwrap_or("")
                .to_string(),
            message_type: message_type.to_string(),
            attachment,
            direction: MessageDirection::Incoming,
            created_at: m
                .date
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::Update;

    fn parse(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    /// **Test: TelegramUserWrapper keeps id, names and the client language tag.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = TgUser {
            id: 123,
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("uk".to_string()),
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
        assert_eq!(core_user.language_code, Some("uk".to_string()));
    }

    /// **Test: A captioned photo becomes a photo attachment with the largest size.**
    #[test]
    fn test_photo_message_picks_largest_size() {
        let update = parse(
            r#"{"update_id": 3, "message": {"message_id": 9, "chat": {"id": 5, "type": "private"},
                "from": {"id": 6, "first_name": "P"}, "caption": "cat",
                "photo": [{"file_id": "small", "width": 90, "height": 90},
                          {"file_id": "big", "width": 800, "height": 600}]}}"#,
        );
        let message = update.message().unwrap();
        let core = TelegramMessageWrapper::new(update.update_id, message).to_core();

        assert_eq!(core.update_id, 3);
        assert_eq!(core.content, "cat");
        assert_eq!(core.message_type, "photo");
        let attachment = core.attachment.unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Photo);
        assert_eq!(attachment.file_id, "big");
    }

    #[test]
    fn test_document_keeps_name_and_mime() {
        let update = parse(
            r#"{"update_id": 4, "message": {"message_id": 1, "chat": {"id": 5},
                "document": {"file_id": "d1", "file_name": "report.pdf", "mime_type": "application/pdf"}}}"#,
        );
        let core = TelegramMessageWrapper::new(4, update.message().unwrap()).to_core();
        let attachment = core.attachment.unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Document);
        assert_eq!(attachment.file_name.as_deref(), Some("report.pdf"));
        assert_eq!(attachment.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(core.user.id, 5);
    }
}
