//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use groq_client::{CompletionOptions, GROQ_API_BASE};
use std::env;
use std::time::Duration;

/// Candidate models tried in order when `GROQ_MODELS` / `MODEL` are unset.
pub const DEFAULT_MODELS: &[&str] = &["llama-3.3-70b-versatile", "llama-3.1-8b-instant"];

/// System instruction sent before every user message unless overridden.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Responda de forma breve, divertida e em português.";

/// LLM configuration interface for the Groq OpenAI-compatible API.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    /// Ordered candidate model identifiers; never empty.
    fn models(&self) -> &[String];
    fn system_prompt(&self) -> &str;
    fn completion_options(&self) -> CompletionOptions;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub models: Vec<String>,
    pub system_prompt: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.groq_api_key
    }
    fn base_url(&self) -> &str {
        &self.groq_base_url
    }
    fn models(&self) -> &[String] {
        &self.models
    }
    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Splits a comma-separated model list, trimming entries and dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value: {}", key, raw)),
        _ => Ok(default),
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. `GROQ_API_KEY` is required and must be non-empty.
    pub fn from_env() -> Result<Self> {
        let groq_api_key = env::var("GROQ_API_KEY").context("GROQ_API_KEY not set")?;
        if groq_api_key.trim().is_empty() {
            anyhow::bail!("GROQ_API_KEY is empty");
        }
        let groq_base_url = env::var("GROQ_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| GROQ_API_BASE.to_string());

        let models = match env::var("GROQ_MODELS").or_else(|_| env::var("MODEL")) {
            Ok(raw) => parse_model_list(&raw),
            Err(_) => DEFAULT_MODELS.iter().map(|s| s.to_string()).collect(),
        };
        if models.is_empty() {
            anyhow::bail!("GROQ_MODELS is set but contains no model identifiers");
        }

        let system_prompt = env::var("SYSTEM_PROMPT")
            .or_else(|_| env::var("LLM_SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let timeout_secs = parse_env("LLM_TIMEOUT_SECS", 60u64)?;
        if timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            groq_api_key,
            groq_base_url,
            models,
            system_prompt,
            timeout_secs,
            max_tokens: parse_env("LLM_MAX_TOKENS", 1024u32)?,
            temperature: parse_env("LLM_TEMPERATURE", 0.7f32)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_llm_env() {
        for key in [
            "GROQ_API_KEY",
            "GROQ_BASE_URL",
            "GROQ_MODELS",
            "MODEL",
            "SYSTEM_PROMPT",
            "LLM_SYSTEM_PROMPT",
            "LLM_TIMEOUT_SECS",
            "LLM_MAX_TOKENS",
            "LLM_TEMPERATURE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn parse_model_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_model_list(" a , b,, c ,"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(parse_model_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn from_env_defaults() {
        clear_llm_env();
        env::set_var("GROQ_API_KEY", "gsk_test");

        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.api_key(), "gsk_test");
        assert_eq!(cfg.base_url(), GROQ_API_BASE);
        assert_eq!(cfg.models(), &["llama-3.3-70b-versatile", "llama-3.1-8b-instant"]);
        assert_eq!(cfg.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cfg.completion_options().timeout, Duration::from_secs(60));
        assert_eq!(cfg.completion_options().max_tokens, 1024);

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn from_env_custom_model_list_keeps_order() {
        clear_llm_env();
        env::set_var("GROQ_API_KEY", "gsk_test");
        env::set_var("GROQ_MODELS", "gemma2-9b-it, llama-3.1-8b-instant");
        env::set_var("LLM_TIMEOUT_SECS", "15");

        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.models(), &["gemma2-9b-it", "llama-3.1-8b-instant"]);
        assert_eq!(cfg.completion_options().timeout, Duration::from_secs(15));

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn from_env_missing_or_empty_key_is_error() {
        clear_llm_env();
        assert!(EnvLlmConfig::from_env().is_err());

        env::set_var("GROQ_API_KEY", "   ");
        assert!(EnvLlmConfig::from_env().is_err());

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn from_env_rejects_empty_model_list_and_bad_numbers() {
        clear_llm_env();
        env::set_var("GROQ_API_KEY", "gsk_test");
        env::set_var("GROQ_MODELS", " , ");
        assert!(EnvLlmConfig::from_env().is_err());

        env::remove_var("GROQ_MODELS");
        env::set_var("LLM_MAX_TOKENS", "lots");
        assert!(EnvLlmConfig::from_env().is_err());

        clear_llm_env();
    }
}
