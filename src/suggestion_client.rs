//! # Suggestion Client
//!
//! Outbound side of the recipe suggestion feature: builds the natural-language
//! prompt from the user's on-hand ingredients, sends it to the completion
//! endpoint, and hands the first choice's message content to the parser.
//!
//! An error object reported by the endpoint propagates as
//! [`SuggestionError::RemoteService`], distinct from the parse failures, so
//! the UI can tell "the service refused" apart from "the answer was garbage".
//! Transport failures are retried with exponential backoff and random jitter,
//! behind a circuit breaker.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::circuit_breaker::CircuitBreaker;
use crate::suggestion::{parse_suggestions, SuggestedRecipe, SuggestionError};
use crate::suggestion_config::{RetryConfig, SuggestionConfig};

/// An on-hand ingredient as entered by the user. Quantity is free text, the
/// prompt embeds it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct PantryIngredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl PantryIngredient {
    pub fn new(name: &str, quantity: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

/// Build the suggestion prompt embedding the ingredient list.
///
/// The model is asked for recipes restricted to the listed ingredients
/// (common spices and seasonings excepted) and for a JSON-array answer in the
/// shape the parser expects.
pub fn build_prompt(ingredients: &[PantryIngredient]) -> String {
    let with_amounts = ingredients
        .iter()
        .map(|ing| format!("{} {} {}", ing.quantity, ing.unit, ing.name))
        .collect::<Vec<_>>()
        .join(", ");
    let names = ingredients
        .iter()
        .map(|ing| ing.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Given these ingredients: {with_amounts}, suggest 5 recipes that use ONLY these \
         ingredients: {names} (excluding common spices and seasonings which are allowed). \
         For each recipe provide: name, brief description, cooking time, difficulty level, \
         cuisine type, servings, list of ingredients with amounts, and step-by-step \
         instructions. Format as JSON array with keys: name, description, cookingTime, \
         difficulty, cuisine, servings, ingredients (array of strings), instructions \
         (array of strings). Keep descriptions under 50 words."
    )
}

/// Delay before retry `attempt` (0-based): exponential backoff from the base
/// delay, capped at the maximum, plus random jitter
fn backoff_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponential = config
        .base_retry_delay_ms
        .saturating_mul(1u64 << attempt.min(16))
        .min(config.max_retry_delay_ms);
    let jitter = if config.jitter_ms > 0 {
        rand::thread_rng().gen_range(0..config.jitter_ms)
    } else {
        0
    };
    Duration::from_millis(exponential + jitter)
}

/// Client for the recipe suggestion endpoint
#[derive(Debug)]
pub struct SuggestionClient {
    http: reqwest::Client,
    config: SuggestionConfig,
    breaker: CircuitBreaker,
}

impl SuggestionClient {
    /// Create a client for the given configuration
    pub fn new(config: SuggestionConfig) -> Self {
        let breaker = CircuitBreaker::new(&config.retry);
        Self {
            http: reqwest::Client::new(),
            config,
            breaker,
        }
    }

    /// Request recipe suggestions for the given ingredients.
    ///
    /// Transport failures retry up to the configured maximum; an
    /// endpoint-reported error or a parse failure propagates immediately.
    /// While the circuit breaker is open the request fails fast with
    /// [`SuggestionError::Unavailable`].
    pub async fn suggest(
        &self,
        ingredients: &[PantryIngredient],
    ) -> Result<Vec<SuggestedRecipe>, SuggestionError> {
        if self.breaker.is_open() {
            warn!("Suggestion circuit breaker is open, failing fast");
            return Err(SuggestionError::Unavailable);
        }

        let prompt = build_prompt(ingredients);
        info!("Requesting suggestions for {} ingredients", ingredients.len());

        let mut attempt = 0;
        loop {
            match self.send_once(&prompt).await {
                Ok(content) => {
                    self.breaker.record_success();
                    return parse_suggestions(&content);
                }
                Err(SuggestionError::Request(msg)) if attempt < self.config.retry.max_retries => {
                    let delay = backoff_delay(attempt, &self.config.retry);
                    warn!(
                        "Suggestion request failed (attempt {}): {msg}; retrying in {:?}",
                        attempt + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(SuggestionError::Request(msg)) => {
                    self.breaker.record_failure();
                    return Err(SuggestionError::Request(msg));
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// One request/response cycle: POST the prompt, surface an endpoint error
    /// payload, and return the first choice's message content
    async fn send_once(&self, prompt: &str) -> Result<String, SuggestionError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(self.config.api_url.as_str())
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SuggestionError::MalformedData(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(SuggestionError::RemoteService(error.message));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| {
                SuggestionError::MalformedData("response carried no completion content".to_string())
            })
    }
}
