//! # intent
//!
//! Maps free text to what the user most likely wants: a weather lookup, exchange rates, news,
//! public holidays, a Wikipedia summary or an explicit AI question. Pure and deterministic; no
//! I/O, no state.
//!
//! ## Modules
//!
//! - [`currency`] – currency vocabulary and rate-pair resolution
//! - [`country`] – language-default countries for news and holidays
//! - [`classifier`] – ordered pattern groups and [`detect_intent`]

pub mod classifier;
pub mod country;
pub mod currency;

pub use classifier::{detect_intent, Intent};
pub use country::default_country;
pub use currency::{rate_pair, resolve_currency, target_currency};
