//! The message relay: sends the text to the LLM and replies with the completion, or with a fixed
//! apology when the completion cannot be obtained.

use crate::core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use async_trait::async_trait;
use llm_client::{ChatMessage, LlmClient};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Sent instead of the completion whenever the LLM call fails. Never contains error details.
pub const APOLOGY_MESSAGE: &str =
    "Desculpe, não consegui responder agora. Tente novamente mais tarde.";

/// Terminal handler: exactly one reply per text message.
#[derive(Clone)]
pub struct RelayHandler {
    llm_client: Arc<dyn LlmClient>,
    bot: Arc<dyn Bot>,
}

impl RelayHandler {
    pub fn new(llm_client: Arc<dyn LlmClient>, bot: Arc<dyn Bot>) -> Self {
        Self { llm_client, bot }
    }

    fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
        for (i, cause) in e.chain().enumerate() {
            if i == 0 {
                error!(cause = %cause, "{}", first_msg);
            } else {
                error!(cause = %cause, "Caused by");
            }
        }
    }

    /// Returns the completion for `text`, or [`APOLOGY_MESSAGE`] on any failure.
    pub async fn reply_text_for(&self, text: &str) -> String {
        match self
            .llm_client
            .get_llm_response_with_messages(vec![ChatMessage::user(text)])
            .await
        {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                error!("LLM returned an empty completion");
                APOLOGY_MESSAGE.to_string()
            }
            Err(e) => {
                Self::log_error_chain(&e, "LLM request failed");
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() {
            return Err(HandlerError::NoText.into());
        }

        let reply = self.reply_text_for(text).await;
        self.bot.reply_to(message, &reply).await.map_err(|e| {
            error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
            e
        })?;
        info!(reply_len = reply.len(), "Reply sent");
        Ok(HandlerResponse::Reply(reply))
    }
}
