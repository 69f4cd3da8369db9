//! Text to speech.

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::OpenAiSettings;

/// Longest text sent for synthesis; the API rejects longer input.
pub const MAX_SPEECH_CHARS: usize = 4096;

#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// Returns OGG/Opus audio suitable for a Telegram voice note.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct OpenAiSpeech {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: Voice,
}

fn parse_voice(name: &str) -> Voice {
    match name.trim().to_ascii_lowercase().as_str() {
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

impl OpenAiSpeech {
    pub fn new(settings: &OpenAiSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            model: settings.tts_model.clone(),
            voice: parse_voice(&settings.tts_voice),
        }
    }
}

#[async_trait]
impl SpeechClient for OpenAiSpeech {
    #[instrument(skip(self, text), fields(model = %self.model, chars = text.chars().count()))]
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let input: String = text.chars().take(MAX_SPEECH_CHARS).collect();
        let request = CreateSpeechRequestArgs::default()
            .input(input)
            .model(SpeechModel::Other(self.model.clone()))
            .voice(self.voice.clone())
            .response_format(SpeechResponseFormat::Opus)
            .build()?;
        let response = self.client.audio().speech(request).await?;
        info!(bytes = response.bytes.len(), "Speech synthesized");
        Ok(response.bytes.to_vec())
    }
}
