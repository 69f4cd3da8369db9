//! Shared fixtures for the webhook tests: a recording bot and an env-free config.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hookbot::{
    build_bot_components, router, BaseConfig, BotComponents, BotConfig, LimitsConfig,
    ProviderConfig,
};
use hookbot_core::{Bot, BotError, Chat, ChatAction, Result};
use std::sync::{Arc, Mutex};
use storage::InMemoryKv;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

/// Records every outbound text as `(chat_id, text)`.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl MockBot {
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
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

/// Every outbound call fails the way an unreachable Bot API would.
#[derive(Default)]
pub struct FailingBot {
    pub attempts: Mutex<usize>,
}

#[async_trait]
impl Bot for FailingBot {
    async fn send_message(&self, _chat: &Chat, _text: &str) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(BotError::Bot("sendMessage: 502 Bad Gateway".to_string()))
    }
    async fn send_chat_action(&self, _chat: &Chat, _action: ChatAction) -> Result<()> {
        Err(BotError::Bot("sendChatAction: 502 Bad Gateway".to_string()))
    }
    async fn send_voice(&self, _chat: &Chat, _audio: Vec<u8>, _caption: Option<&str>) -> Result<()> {
        Err(BotError::Bot("sendVoice: 502 Bad Gateway".to_string()))
    }
    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        Err(BotError::Bot("getFile: 502 Bad Gateway".to_string()))
    }
}

pub fn test_config(secret: Option<&str>, app_env: &str) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "test_bot_token_12345".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            app_env: app_env.to_string(),
            webhook_secret: secret.map(str::to_string),
            state_store: "memory".to_string(),
            database_url: ":memory:".to_string(),
        },
        limits: LimitsConfig::default(),
        providers: ProviderConfig::default(),
    }
}

pub struct TestApp {
    pub app: Router,
    pub bot: Arc<MockBot>,
    pub components: BotComponents,
}

pub fn test_app_with(config: BotConfig) -> TestApp {
    let bot = Arc::new(MockBot::default());
    let components = build_bot_components(&config, Arc::new(InMemoryKv::new()), bot.clone())
        .expect("components build without network access");
    TestApp {
        app: router(components.clone()),
        bot,
        components,
    }
}

/// Router and components over a bot whose every send fails.
pub fn failing_app() -> (Router, BotComponents, Arc<FailingBot>) {
    let bot = Arc::new(FailingBot::default());
    let components = build_bot_components(
        &test_config(Some(SECRET), "production"),
        Arc::new(InMemoryKv::new()),
        bot.clone(),
    )
    .expect("components build without network access");
    (router(components.clone()), components, bot)
}

/// A text update that edits an earlier message.
pub fn edited_update(update_id: i64, chat_id: i64, text: &str) -> String {
    serde_json::json!({
        "update_id": update_id,
        "edited_message": {
            "message_id": update_id,
            "date": 1_700_000_000,
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test", "language_code": "en"},
            "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
            "text": text
        }
    })
    .to_string()
}

pub fn test_app() -> TestApp {
    test_app_with(test_config(Some(SECRET), "production"))
}

/// A private-chat text update as Telegram would deliver it.
pub fn text_update(update_id: i64, chat_id: i64, text: &str) -> String {
    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "date": 1_700_000_000,
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test", "language_code": "en"},
            "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
            "text": text
        }
    })
    .to_string()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

pub async fn post_webhook(app: &Router, body: &str, secret: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}
