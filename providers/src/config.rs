//! Provider settings. Values are filled from the application config; defaults point at the
//! public endpoints.

/// OpenAI-compatible API settings shared by the chat, vision and speech clients.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub system_prompt: Option<String>,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            vision_model: "gpt-4o-mini".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "alloy".to_string(),
            system_prompt: None,
        }
    }
}

/// Base URLs of the lookup APIs. `wiki` may contain `{lang}`, replaced by the wiki language.
#[derive(Debug, Clone)]
pub struct LookupEndpoints {
    pub geocoding: String,
    pub forecast: String,
    pub rates: String,
    pub news: String,
    pub news_api_key: Option<String>,
    pub holidays: String,
    pub wiki: String,
}

impl Default for LookupEndpoints {
    fn default() -> Self {
        Self {
            geocoding: "https://geocoding-api.open-meteo.com".to_string(),
            forecast: "https://api.open-meteo.com".to_string(),
            rates: "https://open.er-api.com".to_string(),
            news: "https://newsapi.org".to_string(),
            news_api_key: None,
            holidays: "https://date.nager.at".to_string(),
            wiki: "https://{lang}.wikipedia.org".to_string(),
        }
    }
}

impl LookupEndpoints {
    /// Points every endpoint at one base (tests against a single mock server).
    pub fn all_at(base: &str) -> Self {
        Self {
            geocoding: base.to_string(),
            forecast: base.to_string(),
            rates: base.to_string(),
            news: base.to_string(),
            news_api_key: None,
            holidays: base.to_string(),
            wiki: base.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriveSettings {
    pub access_token: String,
    pub folder_id: Option<String>,
    pub base_url: String,
}

impl DriveSettings {
    pub fn new(access_token: impl Into<String>, folder_id: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            folder_id,
            base_url: "https://www.googleapis.com".to_string(),
        }
    }
}
