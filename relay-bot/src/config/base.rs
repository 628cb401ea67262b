//! Base config: Telegram connection, logging and HTTP listener. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_LOG_FILE: &str = "logs/relay-bot.log";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Base config: Telegram-related, logging, listener only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE; `None` when set to an empty string
    pub log_file: Option<String>,
    /// BIND_ADDR
    pub bind_addr: String,
    /// PORT
    pub port: u16,
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    /// A missing or empty token is an error.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| non_empty_env("BOT_TOKEN"))
            .or_else(|| non_empty_env("TELEGRAM_TOKEN"))
            .context("BOT_TOKEN not set or empty")?;

        let telegram_api_url =
            non_empty_env("TELEGRAM_API_URL").or_else(|| non_empty_env("TELOXIDE_API_URL"));

        let log_file = match env::var("LOG_FILE") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(path),
            Err(_) => Some(DEFAULT_LOG_FILE.to_string()),
        };

        let bind_addr =
            non_empty_env("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = match non_empty_env("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            bind_addr,
            port,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        self.listen_addr()?;
        Ok(())
    }

    /// Socket address for the HTTP listener.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid IP address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
