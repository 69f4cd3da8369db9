//! # middleware
//!
//! Admission steps that run before a webhook update reaches the handlers:
//! [`SecretVerifier`] (who may call us), [`DedupGuard`] (process each update once),
//! [`RateLimiter`] with [`WarnSuppressor`] (per-chat flood control) and the chain middleware
//! built on them, [`RateLimitMiddleware`] and [`LoggingMiddleware`].

mod dedup;
mod logging;
mod rate_limit;
mod secret;

#[cfg(test)]
mod test;

pub use dedup::{DedupGuard, DEFAULT_DEDUP_TTL};
pub use logging::LoggingMiddleware;
pub use rate_limit::{
    RateDecision, RateLimitMiddleware, RateLimiter, WarnSuppressor, DEFAULT_BURST,
    DEFAULT_WARN_TTL, DEFAULT_WINDOW_MS,
};
pub use secret::{
    constant_time_eq, SecretCandidates, SecretVerifier, ALT_SECRET_HEADER, SECRET_HEADER,
    SECRET_QUERY_PARAM,
};
