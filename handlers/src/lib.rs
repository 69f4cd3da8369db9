//! # handlers
//!
//! The bot's behaviour as a sequence of [`hookbot_core::Handler`]s, in routing order:
//!
//! - [`CommandHandler`] – slash commands
//! - [`AttachmentHandler`] – photos, voice notes and documents (Drive or photo memory)
//! - [`CaptureHandler`] – learn mode and autolog notes
//! - [`IntentHandler`] – free text classified into lookups
//! - [`AiHandler`] – everything left goes to the LLM
//!
//! All handlers share one [`Services`] value and send their own replies.

mod answers;
mod attachment;
mod capture;
mod command;
mod format;
mod services;

#[cfg(test)]
mod test;

pub use answers::{AiHandler, IntentHandler, RECALL_LIMIT};
pub use attachment::AttachmentHandler;
pub use capture::CaptureHandler;
pub use command::{parse_command, CommandHandler};
pub use services::Services;
