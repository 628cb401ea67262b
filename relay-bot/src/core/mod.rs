//! Core types and traits: Handler, Bot, Message, HandlerResponse, errors, logger.
//! Transport-agnostic; the telegram module adapts teloxide types into these.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
