//! Handlers making up the relay chain: logging, `/start`, and the LLM relay.

mod logging_handler;
mod relay_handler;
mod start_handler;

pub use logging_handler::LoggingHandler;
pub use relay_handler::{RelayHandler, APOLOGY_MESSAGE};
pub use start_handler::{is_start_command, BotUsername, StartCommandHandler, GREETING_MESSAGE};
