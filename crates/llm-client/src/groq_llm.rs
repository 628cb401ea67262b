//! Groq implementation of [`LlmClient`]: prepends the system instruction and walks the candidate
//! models in order, first non-empty completion wins.

use anyhow::Result;
use async_trait::async_trait;
use groq_client::{ChatCompletionRequestMessage, GroqClient};
use tracing::{info, instrument, warn};

use super::config::{LlmConfig, DEFAULT_MODELS, DEFAULT_SYSTEM_PROMPT};
use super::{chat_message_to_openai, ChatMessage, LlmClient};

/// [`LlmClient`] backed by [`GroqClient`] with an ordered model fallback list.
#[derive(Clone)]
pub struct GroqLlmClient {
    client: GroqClient,
    models: Vec<String>,
    system_prompt: String,
}

impl GroqLlmClient {
    pub fn new(client: GroqClient) -> Self {
        Self {
            client,
            models: DEFAULT_MODELS.iter().map(|s| s.to_string()).collect(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Builds the client from config: base URL, key, limits, models and system instruction.
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self> {
        let client = GroqClient::with_base_url(
            config.api_key().to_string(),
            config.base_url().to_string(),
        )
        .with_options(config.completion_options())?;
        Ok(Self::new(client)
            .with_models(config.models().to_vec())
            .with_system_prompt(config.system_prompt()))
    }

    /// Replaces the candidate list. An empty list keeps the current one.
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        if !models.is_empty() {
            self.models = models;
        }
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn build_request_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        out.push(chat_message_to_openai(&ChatMessage::system(
            self.system_prompt.as_str(),
        ))?);
        for msg in messages {
            out.push(chat_message_to_openai(msg)?);
        }
        Ok(out)
    }
}

#[async_trait]
impl LlmClient for GroqLlmClient {
    #[instrument(skip(self, messages), fields(candidates = self.models.len()))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request_messages = self.build_request_messages(&messages)?;
        let mut last_error: Option<anyhow::Error> = None;

        for (attempt, model) in self.models.iter().enumerate() {
            match self
                .client
                .chat_completion(model, request_messages.clone())
                .await
            {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        model = %model,
                        attempt = attempt + 1,
                        reply_len = text.len(),
                        "Completion received"
                    );
                    return Ok(text);
                }
                Ok(_) => {
                    warn!(
                        model = %model,
                        attempt = attempt + 1,
                        "Empty completion, trying next model"
                    );
                    last_error = Some(anyhow::anyhow!("Empty completion from model {}", model));
                }
                Err(e) => {
                    warn!(
                        model = %model,
                        attempt = attempt + 1,
                        error = %e,
                        "Completion failed, trying next model"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("No candidate models configured"))
            .context(format!("All {} candidate models failed", self.models.len())))
    }
}
