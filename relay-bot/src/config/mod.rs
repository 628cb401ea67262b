//! Bot configuration: BaseConfig (Telegram + log + listener) + TransportConfig (delivery mode)
//! + the LLM config from `llm-client`.

mod base;
mod bot_config;
mod transport;


pub use base::{BaseConfig, DEFAULT_LOG_FILE, DEFAULT_PORT};
pub use bot_config::{BotConfig, ConfigOverrides};
pub use transport::{TransportConfig, TransportMode};
