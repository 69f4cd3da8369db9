//! BotConfig: BaseConfig + LimitsConfig + ProviderConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, LimitsConfig, ProviderConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub limits: LimitsConfig,
    pub providers: ProviderConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let limits = LimitsConfig::from_env()?;
        let providers = ProviderConfig::from_env();
        Ok(Self {
            base,
            limits,
            providers,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.limits.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }
    pub fn providers(&self) -> &ProviderConfig {
        &self.providers
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn webhook_secret(&self) -> Option<&str> {
        self.base.webhook_secret.as_deref()
    }
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.base.host, self.base.port)
    }
}
