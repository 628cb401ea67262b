//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{BotConfig, ConfigOverrides, TransportMode};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram bot that relays messages to Groq", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; flags override BOT_TOKEN, TRANSPORT_MODE and PORT).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, value_enum)]
        mode: Option<TransportMode>,
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Load BotConfig from environment with the given command-line overrides.
pub fn load_config(
    token: Option<String>,
    mode: Option<TransportMode>,
    port: Option<u16>,
) -> Result<BotConfig> {
    BotConfig::load(ConfigOverrides { token, mode, port })
}
