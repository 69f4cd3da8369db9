//! Process entry points: serve the webhook, or register it with Telegram.

use anyhow::{Context, Result};
use hookbot_core::init_tracing;
use hookbot_telegram::{set_webhook, TelegramBotAdapter, TelegramConfig};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::{build_bot_components, create_state_store};
use crate::config::BotConfig;
use crate::server::router;

fn telegram_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    TelegramConfig::with_token(config.bot_token().to_string())
        .with_api_url(config.telegram_api_url().map(str::to_string))
        .build_bot()
}

fn init_logging(config: &BotConfig) -> Result<()> {
    if let Some(dir) = std::path::Path::new(config.log_file()).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).context("Failed to create logs directory")?;
        }
    }
    init_tracing(config.log_file())
}

/// Main entry: validate config, init logging, build components, then serve until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_server(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_logging(&config)?;

    info!(
        state_store = %config.base().state_store,
        development = config.base().is_development(),
        "Initializing bot"
    );

    let kv = create_state_store(&config).await?;
    let bot = Arc::new(TelegramBotAdapter::new(telegram_bot(&config)?));
    let components = build_bot_components(&config, kv, bot)?;
    let app = router(components);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Bot started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

/// Registers `url` as the webhook, passing WEBHOOK_SECRET along when set.
pub async fn register_webhook(config: BotConfig, url: &str) -> Result<()> {
    config.base().validate()?;
    init_logging(&config)?;
    let bot = telegram_bot(&config)?;
    set_webhook(&bot, url, config.webhook_secret()).await
}
