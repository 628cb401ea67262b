//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait used by the relay handler and the Groq implementation,
//! [`GroqLlmClient`], which walks an ordered list of candidate models.

use anyhow::Result;
use async_trait::async_trait;
use groq_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

mod config;
mod groq_llm;
mod message;

pub use config::{
    parse_model_list, EnvLlmConfig, LlmConfig, DEFAULT_MODELS, DEFAULT_SYSTEM_PROMPT,
};
pub use groq_client::mask_token;
pub use groq_llm::GroqLlmClient;
pub use message::{ChatMessage, MessageRole};

/// LLM client interface: one completion for a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages.
    /// Implementations add the system instruction.
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Converts a [`ChatMessage`] into the OpenAI-compatible request format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
