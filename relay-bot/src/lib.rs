//! # Relay bot
//!
//! Telegram bot that forwards each text message to Groq and replies with the completion.
//! Updates arrive either by long polling or through `POST /webhook` on the built-in HTTP
//! listener; the mode is fixed at startup.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod server;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use self::core::{
    init_tracing, Bot, Chat, Handler, HandlerError, HandlerResponse, Message, MessageDirection,
    RelayError, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    build_teloxide_bot, run_polling, update_to_core, TelegramBotAdapter, TelegramMessageWrapper,
    TelegramUserWrapper,
};

pub use components::{build_handler_chain, build_handler_chain_with_username, BotComponents};
pub use config::{BotConfig, ConfigOverrides, TransportMode};
pub use handlers::{
    BotUsername, LoggingHandler, RelayHandler, StartCommandHandler, APOLOGY_MESSAGE,
    GREETING_MESSAGE,
};
pub use runner::{run_bot, run_with_shutdown, shutdown_signal};
pub use server::{build_router, AppState};
