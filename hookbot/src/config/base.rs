//! Base config: Telegram connection, HTTP listener, logging, state store. Loaded from env.

use anyhow::{bail, Context, Result};
use std::env;

/// Base config: Telegram-related, server, logging and state store only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    pub host: String,
    pub port: u16,
    /// APP_ENV; "development" or "dev" relaxes the webhook secret requirement
    pub app_env: String,
    /// WEBHOOK_SECRET
    pub webhook_secret: Option<String>,
    /// STATE_STORE: "memory" or "sqlite"
    pub state_store: String,
    /// SQLite file or `sqlite:` URL, used when STATE_STORE=sqlite
    pub database_url: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let port = match env::var("PORT") {
            Ok(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file: var_or("LOG_FILE", "logs/hookbot.log"),
            host: var_or("HOST", "0.0.0.0"),
            port,
            app_env: var_or("APP_ENV", "production"),
            webhook_secret: env::var("WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            state_store: var_or("STATE_STORE", "memory").to_ascii_lowercase(),
            database_url: var_or("DATABASE_URL", "./data/hookbot.db"),
        })
    }

    pub fn is_development(&self) -> bool {
        matches!(self.app_env.to_ascii_lowercase().as_str(), "development" | "dev")
    }

    /// Rejects an invalid TELEGRAM_API_URL, an unknown STATE_STORE and a missing secret
    /// outside development.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if !matches!(self.state_store.as_str(), "memory" | "sqlite") {
            bail!("STATE_STORE must be \"memory\" or \"sqlite\", got {:?}", self.state_store);
        }
        if self.webhook_secret.is_none() && !self.is_development() {
            bail!("WEBHOOK_SECRET is required unless APP_ENV=development");
        }
        Ok(())
    }
}
