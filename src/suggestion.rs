//! # Recipe Suggestion Parsing
//!
//! This module turns the free-text output of the completion endpoint into
//! typed recipe records. The model is asked to answer with a JSON array, but
//! it routinely wraps it in prose, so parsing is a two-stage pipeline with
//! distinct failure modes:
//!
//! 1. Extract the bracketed substring, greedily from the first `[` to the
//!    last `]`. No such substring means [`SuggestionError::NoRecipesFound`].
//! 2. Decode that substring as a JSON array of recipe objects. A decode
//!    failure means [`SuggestionError::MalformedData`].
//!
//! Decoded elements are normalized, never rejected: each gets a generated
//! `recipe-<index>` id, missing ingredient/instruction lists default to
//! empty, and a garbage `servings` value decodes to 0. Rendering whatever the
//! model produced is the detail view's problem, not the parser's.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

/// Greedy match from the first `[` to the last `]`, newlines included
static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// A recipe suggested by the model, normalized for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedRecipe {
    /// Generated identifier of the form `recipe-<index>`
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free text, e.g. "25 min"
    #[serde(default)]
    pub cooking_time: String,
    /// Free text, e.g. "easy"
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub cuisine: String,
    /// Leniently decoded: numbers and numeric strings work, garbage is 0
    #[serde(default, deserialize_with = "lenient_servings")]
    pub servings: u32,
    /// Display strings, never absent
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Display strings, never absent
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn lenient_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let servings = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0) as u32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(servings)
}

/// Failure modes of the suggestion pipeline, kept distinct so the UI can
/// give differentiated guidance
#[derive(Debug)]
pub enum SuggestionError {
    /// The response contained no bracketed JSON array at all
    NoRecipesFound,
    /// A bracketed substring was found but did not decode
    MalformedData(String),
    /// The endpoint reported an error payload; surfaced verbatim
    RemoteService(String),
    /// Transport-level failure talking to the endpoint
    Request(String),
    /// The circuit breaker is open after repeated transport failures
    Unavailable,
}

impl std::fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionError::NoRecipesFound => {
                write!(f, "Couldn't find any recipes in the response")
            }
            SuggestionError::MalformedData(msg) => {
                write!(f, "Got a malformed recipe response: {msg}")
            }
            SuggestionError::RemoteService(msg) => write!(f, "{msg}"),
            SuggestionError::Request(msg) => write!(f, "Request failed: {msg}"),
            SuggestionError::Unavailable => {
                write!(f, "Suggestions are temporarily unavailable, please retry later")
            }
        }
    }
}

impl std::error::Error for SuggestionError {}

impl From<reqwest::Error> for SuggestionError {
    fn from(err: reqwest::Error) -> Self {
        SuggestionError::Request(err.to_string())
    }
}

/// Parse raw model output into suggested recipes.
///
/// See the module docs for the two-stage pipeline and its failure modes.
pub fn parse_suggestions(raw: &str) -> Result<Vec<SuggestedRecipe>, SuggestionError> {
    let candidate = JSON_ARRAY
        .find(raw)
        .ok_or(SuggestionError::NoRecipesFound)?;

    let mut recipes: Vec<SuggestedRecipe> = serde_json::from_str(candidate.as_str())
        .map_err(|e| SuggestionError::MalformedData(e.to_string()))?;

    for (index, recipe) in recipes.iter_mut().enumerate() {
        recipe.id = format!("recipe-{index}");
    }

    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_example() {
        let raw = "Here are some ideas:\n[{\"name\":\"Toast\",\"description\":\"Simple\",\
                   \"cookingTime\":\"5 min\",\"difficulty\":\"easy\",\"cuisine\":\"any\",\
                   \"servings\":1,\"ingredients\":[\"bread\"],\"instructions\":[\"toast it\"]}]";

        let recipes = parse_suggestions(raw).unwrap();
        assert_eq!(recipes.len(), 1);

        let recipe = &recipes[0];
        assert_eq!(recipe.id, "recipe-0");
        assert_eq!(recipe.name, "Toast");
        assert_eq!(recipe.description, "Simple");
        assert_eq!(recipe.cooking_time, "5 min");
        assert_eq!(recipe.difficulty, "easy");
        assert_eq!(recipe.cuisine, "any");
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.ingredients, vec!["bread"]);
        assert_eq!(recipe.instructions, vec!["toast it"]);
    }

    #[test]
    fn test_no_brackets_fails_with_no_recipes_found() {
        let result = parse_suggestions("Sorry, I have no ideas today.");
        assert!(matches!(result, Err(SuggestionError::NoRecipesFound)));
    }

    #[test]
    fn test_malformed_json_inside_brackets() {
        let result = parse_suggestions("Ideas: [{\"name\": oops]");
        assert!(matches!(result, Err(SuggestionError::MalformedData(_))));
    }

    #[test]
    fn test_ids_follow_array_position() {
        let raw = "[{\"name\":\"A\"},{\"name\":\"B\"},{\"name\":\"C\"}]";
        let recipes = parse_suggestions(raw).unwrap();
        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["recipe-0", "recipe-1", "recipe-2"]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let raw = "[{\"name\":\"Mystery dish\"}]";
        let recipes = parse_suggestions(raw).unwrap();
        assert!(recipes[0].ingredients.is_empty());
        assert!(recipes[0].instructions.is_empty());
        assert_eq!(recipes[0].servings, 0);
    }

    #[test]
    fn test_greedy_extraction_spans_nested_arrays() {
        // Inner arrays must not terminate the match early
        let raw = "Sure!\n[{\"name\":\"Salad\",\"ingredients\":[\"lettuce\",\"oil\"]}]\nEnjoy!";
        let recipes = parse_suggestions(raw).unwrap();
        assert_eq!(recipes[0].ingredients.len(), 2);
    }

    #[test]
    fn test_servings_is_lenient() {
        let raw = "[{\"name\":\"A\",\"servings\":\"4\"},\
                    {\"name\":\"B\",\"servings\":\"about six\"},\
                    {\"name\":\"C\",\"servings\":2.0}]";
        let recipes = parse_suggestions(raw).unwrap();
        assert_eq!(recipes[0].servings, 4);
        assert_eq!(recipes[1].servings, 0);
        assert_eq!(recipes[2].servings, 2);
    }

    #[test]
    fn test_empty_array_is_ok() {
        let recipes = parse_suggestions("here: []").unwrap();
        assert!(recipes.is_empty());
    }
}
