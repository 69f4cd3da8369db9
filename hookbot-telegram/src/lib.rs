//! # hookbot-telegram
//!
//! Telegram transport layer: webhook [`Update`] types, adapters to hookbot_core types, the
//! teloxide-backed [`hookbot_core::Bot`] implementation, and webhook registration.
//! No routing, persistence or AI logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod update;
mod webhook;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use update::{Document, PhotoSize, TgChat, TgMessage, TgUser, Update, Voice};
pub use webhook::set_webhook;
