//! Component factory: builds BotComponents from config once at startup. Isolates assembly logic
//! from the runner; handlers receive their collaborators here instead of reading globals.

use anyhow::{Context, Result};
use llm_client::{GroqLlmClient, LlmClient};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot;
use crate::handlers::{BotUsername, LoggingHandler, RelayHandler, StartCommandHandler};
use crate::telegram::{build_teloxide_bot, TelegramBotAdapter};

/// Dependencies for the runner; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    /// Raw client for lifecycle calls (getMe, polling, webhook registration).
    pub teloxide_bot: teloxide::Bot,
    /// Outbound side used by handlers.
    pub bot: Arc<dyn Bot>,
    pub llm_client: Arc<dyn LlmClient>,
    /// Filled by the runner from getMe; read by the `/start` handler.
    pub bot_username: BotUsername,
    pub handler_chain: HandlerChain,
}

impl BotComponents {
    /// Builds the Telegram client, its adapter, the Groq client and the handler chain.
    #[instrument(skip(config))]
    pub fn build(config: &BotConfig) -> Result<Self> {
        let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
        let llm_client = GroqLlmClient::from_config(&config.llm)
            .context("Failed to build Groq client")?;
        info!(models = ?llm_client.models(), "LLM client ready");

        let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
        Ok(Self::from_parts(teloxide_bot, bot, Arc::new(llm_client)))
    }

    /// Assembles components from prebuilt parts (tests inject mocks here).
    pub fn from_parts(
        teloxide_bot: teloxide::Bot,
        bot: Arc<dyn Bot>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        let bot_username = BotUsername::default();
        let handler_chain = build_handler_chain_with_username(
            bot.clone(),
            llm_client.clone(),
            bot_username.clone(),
        );
        Self {
            teloxide_bot,
            bot,
            llm_client,
            bot_username,
            handler_chain,
        }
    }
}

/// Builds the handler chain (logging → /start → LLM relay).
pub fn build_handler_chain(bot: Arc<dyn Bot>, llm_client: Arc<dyn LlmClient>) -> HandlerChain {
    build_handler_chain_with_username(bot, llm_client, BotUsername::default())
}

/// Same chain, with `/start@<name>` matched against the shared bot username.
pub fn build_handler_chain_with_username(
    bot: Arc<dyn Bot>,
    llm_client: Arc<dyn LlmClient>,
    bot_username: BotUsername,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(
            StartCommandHandler::new(bot.clone()).with_bot_username(bot_username),
        ))
        .add_handler(Arc::new(RelayHandler::new(llm_client, bot)))
}
