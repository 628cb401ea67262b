//! Binary entry point: loads `.env`, parses the CLI and runs the bot.

use anyhow::Result;
use clap::Parser;
use relay_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, mode, port } => {
            let config = load_config(token, mode, port)?;
            run_bot(config).await
        }
    }
}
