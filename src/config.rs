//! Configuration management for the calculus agent.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. API key for the chat completions endpoint.
//! - `OPENROUTER_BASE_URL` - Optional. OpenAI-compatible base URL. Defaults to OpenRouter.
//! - `DEFAULT_MODEL` - Optional. Model identifier. Defaults to `google/gemini-2.5-flash`.
//! - `MAX_ITERATIONS` - Optional. Maximum decision/action iterations. Defaults to `25`.
//! - `LLM_TIMEOUT_SECS` - Optional. Per-request timeout. Defaults to `30`.
//! - `PREFERENCES_PATH` - Optional. User preference file. Defaults to `user_memory.json`.
//! - `VERIFY_RESULTS` - Optional. Overrides the stored verification preference.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::llm::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the model endpoint
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Model identifier (OpenRouter format)
    pub default_model: String,

    /// Maximum iterations of the decision/action loop
    pub max_iterations: usize,

    /// Timeout for a single model request
    pub llm_timeout: Duration,

    /// Where user preferences are persisted
    pub preferences_path: PathBuf,

    /// Forces verification on or off regardless of stored preferences
    pub verify_override: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set,
    /// and `ConfigError::InvalidValue` for unparseable numbers or booleans.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let base_url =
            std::env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let default_model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| "google/gemini-2.5-flash".to_string());

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "25".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        let llm_timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let preferences_path = std::env::var("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("user_memory.json"));

        let verify_override = std::env::var("VERIFY_RESULTS")
            .ok()
            .map(|v| {
                parse_bool(&v).map_err(|e| ConfigError::InvalidValue("VERIFY_RESULTS".to_string(), e))
            })
            .transpose()?;

        Ok(Self {
            api_key,
            base_url,
            default_model,
            max_iterations,
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            preferences_path,
            verify_override,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model,
            max_iterations: 25,
            llm_timeout: Duration::from_secs(30),
            preferences_path: PathBuf::from("user_memory.json"),
            verify_override: None,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boolean_like_values() {
        assert_eq!(parse_bool("YES"), Ok(true));
        assert_eq!(parse_bool(" off "), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_config_has_defaults() {
        let config = Config::new("key".to_string(), "model".to_string());
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.verify_override, None);
    }
}
