//! Admission limits: dedup marker lifetime and per-chat rate limiting.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub dedup_ttl_secs: u64,
    pub rate_window_ms: u64,
    pub rate_burst: u32,
    pub rate_warn_ttl_secs: u64,
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{name} is not a valid number: {v}")),
        _ => Ok(default),
    }
}

impl LimitsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            dedup_ttl_secs: parse_var("DEDUP_TTL_SECS", 120)?,
            rate_window_ms: parse_var("RATE_WINDOW_MS", middleware::DEFAULT_WINDOW_MS)?,
            rate_burst: parse_var("RATE_BURST", middleware::DEFAULT_BURST)?,
            rate_warn_ttl_secs: parse_var("RATE_WARN_TTL_SECS", 10)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_window_ms == 0 || self.rate_burst == 0 {
            bail!("RATE_WINDOW_MS and RATE_BURST must be greater than zero");
        }
        if self.dedup_ttl_secs == 0 {
            bail!("DEDUP_TTL_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn dedup_ttl(&self) -> Duration {
        Duration::from_secs(self.dedup_ttl_secs)
    }

    pub fn warn_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_warn_ttl_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            dedup_ttl_secs: 120,
            rate_window_ms: middleware::DEFAULT_WINDOW_MS,
            rate_burst: middleware::DEFAULT_BURST,
            rate_warn_ttl_secs: 10,
        }
    }
}
