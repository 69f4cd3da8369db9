//! Unit test module
//!
//! Handler tests run against an in-memory store and hand-written fakes for the bot and providers.

mod attachment_test;
mod capture_test;

use anyhow::{anyhow, Result as AnyResult};
use async_trait::async_trait;
use chrono::Utc;
use hookbot_core::{
    Attachment, AttachmentKind, Bot, BotError, Chat, ChatAction, Message, MessageDirection,
    Result, User,
};
use providers::{
    DriveClient, DriveFile, Headline, Holiday, LlmClient, Lookup, RateQuote, SpeechClient,
    WeatherReport, WikiSummary,
};
use std::sync::{Arc, Mutex};
use storage::InMemoryKv;

use crate::services::Services;

/// Records texts, chat actions and voice notes. `download_file` serves `file_bytes`.
/// With `actions_down` every chat action is recorded and then fails.
#[derive(Default)]
pub(crate) struct MockBot {
    pub sent: Mutex<Vec<String>>,
    pub actions: Mutex<Vec<ChatAction>>,
    pub voices: Mutex<Vec<Vec<u8>>>,
    pub file_bytes: Option<Vec<u8>>,
    pub actions_down: bool,
}

impl MockBot {
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
    async fn send_chat_action(&self, _chat: &Chat, action: ChatAction) -> Result<()> {
        self.actions.lock().unwrap().push(action);
        if self.actions_down {
            return Err(BotError::Bot("sendChatAction timed out".to_string()));
        }
        Ok(())
    }
    async fn send_voice(&self, _chat: &Chat, audio: Vec<u8>, _caption: Option<&str>) -> Result<()> {
        self.voices.lock().unwrap().push(audio);
        Ok(())
    }
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.file_bytes
            .clone()
            .ok_or_else(|| BotError::Bot(format!("file {file_id} not found")))
    }
}

/// Canned lookups. Fails every call when `down` is set and records queried cities.
#[derive(Default)]
pub(crate) struct FakeLookup {
    pub down: bool,
    pub cities: Mutex<Vec<String>>,
}

#[async_trait]
impl Lookup for FakeLookup {
    async fn weather(&self, city: &str) -> AnyResult<WeatherReport> {
        if self.down {
            return Err(anyhow!("upstream down"));
        }
        self.cities.lock().unwrap().push(city.to_string());
        Ok(WeatherReport {
            place: city.to_string(),
            country: None,
            temperature_c: 20.0,
            wind_kmh: 5.0,
            weather_code: 0,
        })
    }

    async fn rates(&self, from: &str, to: &str) -> AnyResult<RateQuote> {
        if self.down {
            return Err(anyhow!("upstream down"));
        }
        Ok(RateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate: 41.5,
            updated: None,
        })
    }

    async fn news(&self, _country: &str, _topic: Option<&str>) -> AnyResult<Vec<Headline>> {
        if self.down {
            return Err(anyhow!("upstream down"));
        }
        Ok(vec![Headline {
            title: "Headline".to_string(),
            url: "https://news.example/1".to_string(),
            source: None,
        }])
    }

    async fn holidays(&self, _country: &str, _year: Option<i32>) -> AnyResult<Vec<Holiday>> {
        Ok(Vec::new())
    }

    async fn wiki(&self, title: &str, _lang: &str) -> AnyResult<WikiSummary> {
        if self.down {
            return Err(anyhow!("upstream down"));
        }
        Ok(WikiSummary {
            title: title.to_string(),
            extract: "Summary.".to_string(),
            url: None,
        })
    }
}

/// Echoes the prompt and records the context notes it was given.
#[derive(Default)]
pub(crate) struct FakeLlm {
    pub contexts: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn complete(&self, prompt: &str, context: &[String]) -> AnyResult<String> {
        self.contexts.lock().unwrap().push(context.to_vec());
        Ok(format!("answer: {prompt}"))
    }

    async fn describe_image(
        &self,
        image: &[u8],
        _mime: &str,
        _prompt: Option<&str>,
    ) -> AnyResult<String> {
        Ok(format!("an image of {} bytes", image.len()))
    }
}

pub(crate) struct FakeSpeech;

#[async_trait]
impl SpeechClient for FakeSpeech {
    async fn synthesize(&self, text: &str) -> AnyResult<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }
}

#[derive(Default)]
pub(crate) struct FakeDrive {
    pub uploads: Mutex<Vec<(String, String, usize)>>,
}

#[async_trait]
impl DriveClient for FakeDrive {
    async fn upload(&self, name: &str, mime: &str, bytes: Vec<u8>) -> AnyResult<DriveFile> {
        self.uploads
            .lock()
            .unwrap()
            .push((name.to_string(), mime.to_string(), bytes.len()));
        Ok(DriveFile {
            id: "drive-1".to_string(),
            name: name.to_string(),
            web_view_link: Some("https://drive.example/drive-1".to_string()),
        })
    }
}

/// Services over a fresh in-memory store with the given bot and the default fake lookup.
pub(crate) fn services_with(bot: Arc<MockBot>) -> Services {
    Services::new(bot, Arc::new(InMemoryKv::new()), Arc::new(FakeLookup::default()))
}

pub(crate) fn text_message(content: &str) -> Message {
    Message {
        id: "7".to_string(),
        update_id: 100,
        user: User {
            id: 42,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            language_code: Some("en".to_string()),
        },
        chat: Chat {
            id: 4242,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        attachment: None,
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

pub(crate) fn attachment_message(kind: AttachmentKind, caption: &str) -> Message {
    let mut message = text_message(caption);
    message.message_type = "attachment".to_string();
    message.attachment = Some(Attachment {
        kind,
        file_id: "file-abc".to_string(),
        file_name: None,
        mime_type: None,
    });
    message
}
