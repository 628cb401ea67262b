//! Inbound delivery mode, chosen once at startup.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::telegram::webhook_endpoint_url;

/// How updates reach the bot. Exactly one is active per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TransportMode {
    /// The bot pulls updates with getUpdates.
    #[default]
    Polling,
    /// The platform pushes updates to `POST /webhook`.
    Webhook,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Polling => "polling",
            TransportMode::Webhook => "webhook",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(TransportMode::Polling),
            "webhook" => Ok(TransportMode::Webhook),
            other => anyhow::bail!(
                "Unknown transport mode '{}', expected 'polling' or 'webhook'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// TRANSPORT_MODE
    pub mode: TransportMode,
    /// WEBHOOK_URL: externally reachable base URL, webhook mode only
    pub webhook_url: Option<String>,
}

impl TransportConfig {
    /// Load from environment variables. `mode` overrides TRANSPORT_MODE if provided.
    pub fn load(mode: Option<TransportMode>) -> Result<Self> {
        let mode = match mode {
            Some(m) => m,
            None => match env::var("TRANSPORT_MODE") {
                Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
                _ => TransportMode::default(),
            },
        };
        let webhook_url = env::var("WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self { mode, webhook_url })
    }

    /// Webhook mode requires a valid WEBHOOK_URL; polling ignores it.
    pub fn validate(&self) -> Result<()> {
        if self.mode == TransportMode::Webhook {
            self.webhook_endpoint()?;
        }
        Ok(())
    }

    /// Full URL registered with the platform: `<WEBHOOK_URL>/webhook`.
    pub fn webhook_endpoint(&self) -> Result<reqwest::Url> {
        let base = self
            .webhook_url
            .as_deref()
            .context("WEBHOOK_URL is required in webhook mode")?;
        Ok(webhook_endpoint_url(base)?)
    }
}
