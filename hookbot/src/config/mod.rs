//! Bot configuration: BaseConfig (Telegram, server, log, state store) + LimitsConfig +
//! ProviderConfig (OpenAI, NewsAPI, Drive).

mod base;
mod bot_config;
mod limits;
mod provider_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use limits::LimitsConfig;
pub use provider_config::ProviderConfig;
