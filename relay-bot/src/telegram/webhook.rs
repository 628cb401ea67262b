//! Webhook registration with the Bot API.

use crate::core::{RelayError, Result};
use teloxide::prelude::*;
use tracing::{info, instrument};

/// Path of the update endpoint on the HTTP listener.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Joins the externally reachable base URL with [`WEBHOOK_PATH`].
pub fn webhook_endpoint_url(base: &str) -> Result<reqwest::Url> {
    let joined = format!("{}{}", base.trim().trim_end_matches('/'), WEBHOOK_PATH);
    let url = reqwest::Url::parse(&joined)
        .map_err(|e| RelayError::Transport(format!("Invalid webhook URL {}: {}", joined, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::Transport(format!(
            "Webhook URL must be http(s), got {}",
            other
        ))),
    }
}

/// Tells the platform to push updates to `url`. Must run after the listener is bound.
#[instrument(skip(bot))]
pub async fn register_webhook(bot: &teloxide::Bot, url: &reqwest::Url) -> Result<()> {
    bot.set_webhook(url.clone())
        .await
        .map_err(|e| RelayError::Transport(format!("setWebhook failed: {}", e)))?;
    info!(url = %url, "Webhook registered");
    Ok(())
}

/// Stops push delivery. Called on shutdown before the listener goes away.
#[instrument(skip(bot))]
pub async fn delete_webhook(bot: &teloxide::Bot) -> Result<()> {
    bot.delete_webhook()
        .await
        .map_err(|e| RelayError::Transport(format!("deleteWebhook failed: {}", e)))?;
    info!("Webhook deleted");
    Ok(())
}
