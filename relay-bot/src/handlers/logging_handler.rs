//! Logs each message in before() and the outcome in after(); always continues.

use crate::core::{Handler, HandlerResponse, Message, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let (outcome, reply_len) = match response {
            HandlerResponse::Reply(text) => ("reply", Some(text.len())),
            HandlerResponse::Stop => ("stop", None),
            HandlerResponse::Continue | HandlerResponse::Ignore => ("no_reply", None),
        };
        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            outcome,
            reply_len = ?reply_len,
            "Processed message"
        );
        Ok(())
    }
}
