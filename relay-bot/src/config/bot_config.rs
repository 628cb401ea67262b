//! BotConfig: BaseConfig + TransportConfig + LLM config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::EnvLlmConfig;

use super::{BaseConfig, TransportConfig, TransportMode};

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub mode: Option<TransportMode>,
    pub port: Option<u16>,
}

/// Full bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub transport: TransportConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables, applying `overrides` on top.
    /// Call validate() after load to check config before init.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let mut base = BaseConfig::load(overrides.token)?;
        if let Some(port) = overrides.port {
            base.port = port;
        }
        let transport = TransportConfig::load(overrides.mode)?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self {
            base,
            transport,
            llm,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.transport.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }
    pub fn mode(&self) -> TransportMode {
        self.transport.mode
    }
}
