//! Per-chat fixed-window rate limiting.
//!
//! Windows are aligned to `now_ms / window_ms`. Each window has its own counter key
//! `rl:{chat}:{bucket}`, read, compared and rewritten without any atomicity: concurrent requests
//! may undercount. A burst straddling a window edge can pass up to `2 * burst` requests in a
//! short span. Store errors let the request through.

use async_trait::async_trait;
use chrono::Utc;
use hookbot_core::{texts, Bot, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use std::time::Duration;
use storage::{KvStore, UserPrefsStore};
use tracing::{debug, instrument, warn};

pub const DEFAULT_WINDOW_MS: u64 = 2000;
pub const DEFAULT_BURST: u32 = 3;
pub const DEFAULT_WARN_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Milliseconds until the current window closes; 0 when allowed.
    pub retry_after_ms: u64,
}

impl RateDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_ms: 0,
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    kv: Arc<dyn KvStore>,
    window_ms: u64,
    burst: u32,
}

impl RateLimiter {
    pub fn new(kv: Arc<dyn KvStore>, window_ms: u64, burst: u32) -> Self {
        Self {
            kv,
            window_ms: window_ms.max(1),
            burst,
        }
    }

    pub async fn allow(&self, chat_id: i64) -> RateDecision {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.allow_at(chat_id, now_ms).await
    }

    /// Same as [`allow`](Self::allow) with an explicit clock.
    pub async fn allow_at(&self, chat_id: i64, now_ms: u64) -> RateDecision {
        let bucket = now_ms / self.window_ms;
        let key = format!("rl:{chat_id}:{bucket}");

        let count = match self.kv.get(&key).await {
            Ok(Some(raw)) => raw.trim().parse::<u32>().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Rate limit read failed, allowing");
                return RateDecision::allow();
            }
        };

        if count >= self.burst {
            let retry_after_ms = self.window_ms - now_ms % self.window_ms;
            debug!(chat_id = chat_id, count = count, retry_after_ms = retry_after_ms, "Rate limited");
            return RateDecision {
                allowed: false,
                retry_after_ms,
            };
        }

        // Outlive the window by a second so a slow read near the edge still sees the counter.
        let ttl = Duration::from_secs(self.window_ms.div_ceil(1000) + 1);
        if let Err(e) = self.kv.put(&key, &(count + 1).to_string(), Some(ttl)).await {
            warn!(chat_id = chat_id, error = %e, "Rate limit write failed, allowing");
        }
        RateDecision::allow()
    }
}

/// Limits how often a chat is told it is being rate limited: the first call per TTL wins.
#[derive(Clone)]
pub struct WarnSuppressor {
    kv: Arc<dyn KvStore>,
    ttl: Duration,
}

impl WarnSuppressor {
    pub fn new(kv: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    /// True when the caller should send the notice now. Store errors stay silent.
    pub async fn allow_warn(&self, chat_id: i64) -> bool {
        match self
            .kv
            .put_if_absent(&format!("rlwarn:{chat_id}"), "1", Some(self.ttl))
            .await
        {
            Ok(first) => first,
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Warn suppressor store failed");
                false
            }
        }
    }
}

/// Stops the chain for chats over their rate, sending the throttle notice at most once per warn TTL.
pub struct RateLimitMiddleware {
    limiter: RateLimiter,
    warn: WarnSuppressor,
    prefs: UserPrefsStore,
    bot: Arc<dyn Bot>,
}

impl RateLimitMiddleware {
    pub fn new(
        limiter: RateLimiter,
        warn: WarnSuppressor,
        prefs: UserPrefsStore,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            limiter,
            warn,
            prefs,
            bot,
        }
    }
}

#[async_trait]
impl Middleware for RateLimitMiddleware {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let decision = self.limiter.allow(message.chat.id).await;
        if decision.allowed {
            return Ok(true);
        }

        if self.warn.allow_warn(message.chat.id).await {
            let lang = self
                .prefs
                .reply_lang(message.user.id, message.user.language_code.as_deref())
                .await;
            if let Err(e) = self.bot.reply_to(message, texts(lang).throttled).await {
                warn!(error = %e, "Failed to send throttle notice");
            }
        }
        Ok(false)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
