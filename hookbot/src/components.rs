//! Component factory: builds the state store, services, handler chain and dispatcher from
//! config. Isolates assembly logic from the runner and lets tests inject their own bot.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use handlers::{
    AiHandler, AttachmentHandler, CaptureHandler, CommandHandler, IntentHandler, Services,
};
use hookbot_core::Bot;
use middleware::{
    DedupGuard, LoggingMiddleware, RateLimitMiddleware, RateLimiter, SecretVerifier,
    WarnSuppressor,
};
use providers::{GoogleDrive, HttpLookup, OpenAiLlm, OpenAiSpeech};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use storage::{BrainStore, InMemoryKv, KvStore, SqliteKv, UserPrefsStore};
use tracing::{debug, error, info, instrument, warn};

use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;

/// Everything the HTTP layer needs; cheap to clone into axum state.
#[derive(Clone)]
pub struct BotComponents {
    pub kv: Arc<dyn KvStore>,
    pub services: Arc<Services>,
    pub dispatcher: Arc<Dispatcher>,
    /// Admin routes read and clear brain notes directly.
    pub brain: BrainStore,
}

/// Expired SQLite rows are purged on this interval; reads already ignore them.
const PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Opens the state store selected by STATE_STORE. Chosen once per process.
#[instrument(skip(config))]
pub async fn create_state_store(config: &BotConfig) -> Result<Arc<dyn KvStore>> {
    if config.base().state_store != "sqlite" {
        info!("Using in-memory state store");
        return Ok(Arc::new(InMemoryKv::new()));
    }

    let database_url = config.base().database_url.as_str();
    if !database_url.starts_with("sqlite:") {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
    }
    let kv = Arc::new(SqliteKv::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to open SQLite state store");
        anyhow::anyhow!("Failed to open SQLite state store: {}", e)
    })?);
    info!(database_url = %database_url, "Using SQLite state store");

    let purger = kv.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match purger.purge_expired().await {
                Ok(0) => {}
                Ok(n) => debug!(removed = n, "Purged expired state rows"),
                Err(e) => warn!(error = %e, "Failed to purge expired state rows"),
            }
        }
    });
    Ok(kv)
}

/// Wires the configured providers into [`Services`]. Providers without credentials stay unset.
pub fn build_services(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    kv: Arc<dyn KvStore>,
) -> Result<Services> {
    let providers = config.providers();
    let lookup = HttpLookup::new(providers.lookup_endpoints())?;
    let mut services = Services::new(bot, kv, Arc::new(lookup));

    match providers.openai_settings() {
        Some(settings) => {
            info!(model = %settings.chat_model, "LLM, vision and speech enabled");
            services = services
                .with_llm(Arc::new(OpenAiLlm::new(&settings)))
                .with_speech(Arc::new(OpenAiSpeech::new(&settings)));
        }
        None => info!("OPENAI_API_KEY not set; AI answers, vision and /say are disabled"),
    }
    match providers.drive_settings() {
        Some(settings) => {
            info!("Google Drive uploads enabled");
            services = services.with_drive(Arc::new(GoogleDrive::new(settings)?));
        }
        None => info!("GOOGLE_DRIVE_TOKEN not set; drive mode is disabled"),
    }
    Ok(services)
}

/// Logging and rate limiting around the capability handlers, in routing order.
pub fn build_handler_chain(
    config: &BotConfig,
    services: &Arc<Services>,
    kv: Arc<dyn KvStore>,
) -> HandlerChain {
    let limits = config.limits();
    let rate_limit = RateLimitMiddleware::new(
        RateLimiter::new(kv.clone(), limits.rate_window_ms, limits.rate_burst),
        WarnSuppressor::new(kv.clone(), limits.warn_ttl()),
        UserPrefsStore::new(kv),
        services.bot.clone(),
    );
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(rate_limit))
        .add_handler(Arc::new(CommandHandler::new(services.clone())))
        .add_handler(Arc::new(AttachmentHandler::new(services.clone())))
        .add_handler(Arc::new(CaptureHandler::new(services.clone())))
        .add_handler(Arc::new(IntentHandler::new(services.clone())))
        .add_handler(Arc::new(AiHandler::new(services.clone())))
}

pub fn build_verifier(config: &BotConfig) -> SecretVerifier {
    SecretVerifier::new(
        config.base().webhook_secret.clone(),
        config.base().is_development(),
    )
}

/// Assembles all components over an existing store and bot.
pub fn build_bot_components(
    config: &BotConfig,
    kv: Arc<dyn KvStore>,
    bot: Arc<dyn Bot>,
) -> Result<BotComponents> {
    let services = Arc::new(build_services(config, bot, kv.clone())?);
    let chain = build_handler_chain(config, &services, kv.clone());
    let dedup = DedupGuard::new(kv.clone(), config.limits().dedup_ttl());
    let dispatcher = Arc::new(Dispatcher::new(build_verifier(config), dedup, chain));
    Ok(BotComponents {
        brain: BrainStore::new(kv.clone()),
        kv,
        services,
        dispatcher,
    })
}
