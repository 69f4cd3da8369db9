//! Webhook registration with Telegram.

use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::info;

/// Points Telegram at `url`. With a secret, Telegram echoes it in the
/// `X-Telegram-Bot-Api-Secret-Token` header of every delivery.
pub async fn set_webhook(bot: &teloxide::Bot, url: &str, secret: Option<&str>) -> Result<()> {
    let url = reqwest::Url::parse(url).with_context(|| format!("Invalid webhook URL: {url}"))?;
    let request = bot.set_webhook(url.clone());
    let response = match secret {
        Some(secret) => request.secret_token(secret.to_string()).await,
        None => request.await,
    };
    response.context("setWebhook failed")?;
    info!(url = %url, with_secret = secret.is_some(), "Webhook registered");
    Ok(())
}
