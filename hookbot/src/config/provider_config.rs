//! Optional provider credentials: OpenAI-compatible API, NewsAPI key, Google Drive token.
//! A provider without credentials is simply not wired in.

use providers::{DriveSettings, LookupEndpoints, OpenAiSettings};
use std::env;

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub vision_model: Option<String>,
    pub tts_model: Option<String>,
    pub tts_voice: Option<String>,
    /// LLM_SYSTEM_PROMPT or SYSTEM_PROMPT
    pub system_prompt: Option<String>,
    pub news_api_key: Option<String>,
    pub drive_token: Option<String>,
    pub drive_folder_id: Option<String>,
}

fn opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: opt("OPENAI_API_KEY"),
            openai_base_url: opt("OPENAI_BASE_URL"),
            llm_model: opt("LLM_MODEL").or_else(|| opt("MODEL")),
            vision_model: opt("VISION_MODEL"),
            tts_model: opt("TTS_MODEL"),
            tts_voice: opt("TTS_VOICE"),
            system_prompt: opt("LLM_SYSTEM_PROMPT").or_else(|| opt("SYSTEM_PROMPT")),
            news_api_key: opt("NEWS_API_KEY"),
            drive_token: opt("GOOGLE_DRIVE_TOKEN"),
            drive_folder_id: opt("GOOGLE_DRIVE_FOLDER_ID"),
        }
    }

    /// `None` without OPENAI_API_KEY.
    pub fn openai_settings(&self) -> Option<OpenAiSettings> {
        let mut settings = OpenAiSettings::new(self.openai_api_key.clone()?);
        if let Some(url) = &self.openai_base_url {
            settings.base_url = url.clone();
        }
        if let Some(model) = &self.llm_model {
            settings.chat_model = model.clone();
        }
        if let Some(model) = &self.vision_model {
            settings.vision_model = model.clone();
        }
        if let Some(model) = &self.tts_model {
            settings.tts_model = model.clone();
        }
        if let Some(voice) = &self.tts_voice {
            settings.tts_voice = voice.clone();
        }
        settings.system_prompt = self.system_prompt.clone();
        Some(settings)
    }

    /// `None` without GOOGLE_DRIVE_TOKEN.
    pub fn drive_settings(&self) -> Option<DriveSettings> {
        let token = self.drive_token.clone()?;
        Some(DriveSettings::new(token, self.drive_folder_id.clone()))
    }

    pub fn lookup_endpoints(&self) -> LookupEndpoints {
        LookupEndpoints {
            news_api_key: self.news_api_key.clone(),
            ..LookupEndpoints::default()
        }
    }
}
