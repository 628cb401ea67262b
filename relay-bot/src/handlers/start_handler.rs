//! `/start` command: fixed greeting, no LLM call.

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub const GREETING_MESSAGE: &str = "Olá! Sou seu LeidaSF do Liedson 🚀. Envie uma mensagem!";

/// Bot username reported by getMe; empty until the runner has called it.
pub type BotUsername = Arc<RwLock<Option<String>>>;

/// True for `/start`, `/start <payload>` and `/start@<bot_username>`.
///
/// A `/start@<name>` addressed to another bot does not match. While the username is still
/// unknown any `@` suffix is accepted.
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(cmd) = text.split_whitespace().next() else {
        return false;
    };
    if cmd == "/start" {
        return true;
    }
    match (cmd.strip_prefix("/start@"), bot_username) {
        (Some(target), Some(name)) => target.eq_ignore_ascii_case(name),
        (Some(target), None) => !target.is_empty(),
        (None, _) => false,
    }
}

/// Replies to `/start` with the greeting and stops the chain.
pub struct StartCommandHandler {
    bot: Arc<dyn Bot>,
    greeting: String,
    bot_username: BotUsername,
}

impl StartCommandHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            greeting: GREETING_MESSAGE.to_string(),
            bot_username: BotUsername::default(),
        }
    }

    /// Shares the username slot the runner fills after getMe.
    pub fn with_bot_username(mut self, bot_username: BotUsername) -> Self {
        self.bot_username = bot_username;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

#[async_trait]
impl Handler for StartCommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let bot_username = self.bot_username.read().await;
        if !is_start_command(&message.content, bot_username.as_deref()) {
            return Ok(HandlerResponse::Continue);
        }
        drop(bot_username);
        info!(chat_id = message.chat.id, "Answering /start");
        self.bot.reply_to(message, &self.greeting).await?;
        Ok(HandlerResponse::Reply(self.greeting.clone()))
    }
}
