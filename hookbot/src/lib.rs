//! # hookbot
//!
//! Application crate: loads config from env, selects the state store, wires providers and
//! handlers into the chain, and serves the Telegram webhook over axum.

pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod runner;
pub mod server;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, create_state_store, BotComponents};
pub use config::{BaseConfig, BotConfig, LimitsConfig, ProviderConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use runner::{register_webhook, run_server};
pub use server::router;
