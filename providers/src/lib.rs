//! # providers
//!
//! Outbound capabilities behind small traits so handlers can be tested with fakes:
//!
//! - [`LlmClient`] – chat completion and image description ([`OpenAiLlm`], async-openai)
//! - [`SpeechClient`] – text to speech ([`OpenAiSpeech`])
//! - [`Lookup`] – weather, exchange rates, news, public holidays and Wikipedia summaries
//!   ([`HttpLookup`], plain reqwest against public JSON APIs)
//! - [`DriveClient`] – file upload to Google Drive ([`GoogleDrive`])
//!
//! Every call returns `anyhow::Result`; callers decide how a failure is shown to the user.

mod config;
mod drive;
mod llm;
mod lookup;
mod speech;

pub use config::{DriveSettings, LookupEndpoints, OpenAiSettings};
pub use drive::{DriveClient, DriveFile, GoogleDrive};
pub use llm::{LlmClient, OpenAiLlm, DEFAULT_SYSTEM_PROMPT};
pub use lookup::{
    Headline, Holiday, HttpLookup, Lookup, RateQuote, WeatherReport, WikiSummary,
};
pub use speech::{OpenAiSpeech, SpeechClient};
