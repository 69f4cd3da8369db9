//! # hookbot-core
//!
//! Core types and traits for the webhook bot: [`Bot`], [`Handler`], [`Middleware`], message and
//! user types, reply texts per [`Lang`], and tracing initialization. Transport-agnostic; used by
//! hookbot-telegram, handler-chain, middleware and handlers.

pub mod bot;
pub mod error;
pub mod lang;
pub mod logger;
pub mod types;

pub use bot::{Bot, ChatAction};
pub use error::{BotError, HandlerError, Result};
pub use lang::{texts, Lang, Texts};
pub use logger::init_tracing;
pub use types::{
    Attachment, AttachmentKind, Chat, Handler, HandlerResponse, Message, MessageDirection,
    Middleware, ToCoreMessage, ToCoreUser, User,
};
