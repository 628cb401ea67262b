//! # Groq API client
//!
//! Thin wrapper around [async-openai] pointed at Groq's OpenAI-compatible endpoint.
//! One request per call: no streaming, no retries (rate limits included). Each call is bounded by
//! [`CompletionOptions::timeout`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Base URL of Groq's OpenAI-compatible API.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Masks an API key for logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Per-request limits sent with every completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Whole-request timeout for the HTTP call to Groq.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Backoff that gives up immediately: async-openai would otherwise retry 429s for minutes.
fn no_retry() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Groq chat client. Cheap to clone; the inner async-openai client is shared.
#[derive(Clone)]
pub struct GroqClient {
    client: Arc<Client<OpenAIConfig>>,
    config: OpenAIConfig,
    options: CompletionOptions,
    /// Kept only for masked logging.
    api_key_for_logging: String,
}

impl GroqClient {
    /// Client for the public Groq endpoint with default options.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GROQ_API_BASE.to_string())
    }

    /// Client for a custom base URL (proxies, local mocks).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config.clone()).with_backoff(no_retry())),
            config,
            options: CompletionOptions::default(),
            api_key_for_logging: api_key,
        }
    }

    /// Replaces the completion options and rebuilds the HTTP client with the new timeout.
    pub fn with_options(mut self, options: CompletionOptions) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .context("Failed to build HTTP client for Groq")?;
        self.client = Arc::new(
            Client::with_config(self.config.clone())
                .with_http_client(http_client)
                .with_backoff(no_retry()),
        );
        self.options = options;
        Ok(self)
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Sends one chat completion request and returns the first choice's content.
    ///
    /// Errors on transport failure, API error status, or a response without choices.
    /// A choice with no content yields an empty string; callers decide whether that counts.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            max_tokens = self.options.max_tokens,
            api_key = %mask_token(&self.api_key_for_logging),
            "Groq chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(self.options.max_tokens)
            .temperature(self.options.temperature)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "Groq chat_completion request JSON");
        }

        let chat = self.client.chat();
        let call = chat.create(request);
        let response = tokio::time::timeout(self.options.timeout, call)
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "Groq request for model {} timed out after {:?}",
                    model,
                    self.options.timeout
                )
            })?
            .with_context(|| format!("Groq request failed for model {}", model))?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                model = %model,
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Groq chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in Groq response for model {}", model),
        }
    }
}
