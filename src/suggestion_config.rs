//! # Suggestion Endpoint Configuration
//!
//! Configuration for the third-party completion endpoint that powers recipe
//! suggestions, plus the retry and circuit-breaker settings used when the
//! endpoint misbehaves.

use anyhow::{Context, Result};
use std::env;

/// Default chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Default completion model
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";
/// Referer header sent with every request
pub const DEFAULT_REFERER: &str = "https://snackit.app";
/// Application title header sent with every request
pub const DEFAULT_APP_TITLE: &str = "SnackIt Recipe App";

/// Retry and circuit-breaker settings for suggestion requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial request
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Upper bound of the random jitter added to each delay, in milliseconds
    pub jitter_ms: u64,
    /// Transport failures before the circuit breaker opens
    pub circuit_breaker_threshold: u32,
    /// Time before an open circuit breaker resets, in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000,  // 1 second
            max_retry_delay_ms: 10000,  // 10 seconds
            jitter_ms: 250,
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// Configuration for the suggestion client
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Bearer token for the endpoint
    pub api_key: String,
    /// Completion model identifier
    pub model: String,
    /// Referer header value
    pub referer: String,
    /// Application title header value
    pub app_title: String,
    /// Retry and circuit-breaker settings
    pub retry: RetryConfig,
}

impl SuggestionConfig {
    /// Build a configuration with defaults around the given API key
    pub fn new(api_key: &str) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Load the configuration from the environment, honouring a `.env` file.
    ///
    /// `SUGGESTION_API_KEY` is required; `SUGGESTION_API_URL` and
    /// `SUGGESTION_MODEL` override the defaults when set.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_key =
            env::var("SUGGESTION_API_KEY").context("SUGGESTION_API_KEY must be set")?;

        let mut config = Self::new(&api_key);
        if let Ok(url) = env::var("SUGGESTION_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = env::var("SUGGESTION_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuggestionConfig::new("secret");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.retry.base_retry_delay_ms <= config.retry.max_retry_delay_ms);
    }
}
