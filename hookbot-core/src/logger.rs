//! Tracing setup for the webhook server.
//!
//! One fmt layer writes to stdout and to the log file. Each webhook request closes a span per
//! instrumented handler, so CLOSE events carry the per-update timings.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Filter used when `RUST_LOG` is unset. sqlx logs every statement at info and the HTTP
/// stacks log each connection, which would drown the per-update lines.
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,hyper=warn,hyper_util=warn,reqwest=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber, appending to `log_file_path` as well as stdout.
///
/// Load `.env` first so `RUST_LOG` is seen. ANSI colours are off because the same bytes go to
/// the file.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("Failed to open log file {log_file_path}"))?;
    let writer = io::stdout.and(Arc::new(file));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Tracing already initialised: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        assert!(filter.to_string().contains("sqlx=warn"));
    }
}
