//! Integration tests for the suggestion pipeline: prompt construction and
//! parsing of realistic model output.

use snackit::suggestion::{parse_suggestions, SuggestionError};
use snackit::suggestion_client::{build_prompt, PantryIngredient};

#[test]
fn parses_a_chatty_model_answer() {
    let raw = r#"Sure! Based on what you have, here are a couple of ideas.

[
  {
    "name": "Tomato Rice",
    "description": "A quick one-pot meal.",
    "cookingTime": "25 min",
    "difficulty": "easy",
    "cuisine": "Indian",
    "servings": 2,
    "ingredients": ["2 cups rice", "3 tomatoes", "1 onion"],
    "instructions": ["Fry the onion", "Add tomatoes", "Stir in rice and simmer"]
  },
  {
    "name": "Tomato Soup",
    "description": "Comfort in a bowl.",
    "cookingTime": "20 min",
    "difficulty": "easy",
    "cuisine": "Continental",
    "servings": 4,
    "ingredients": ["5 tomatoes", "1 onion"],
    "instructions": ["Simmer everything", "Blend and season"]
  }
]

Enjoy your cooking!"#;

    let recipes = parse_suggestions(raw).unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, "recipe-0");
    assert_eq!(recipes[0].name, "Tomato Rice");
    assert_eq!(recipes[0].instructions.len(), 3);
    assert_eq!(recipes[1].id, "recipe-1");
    assert_eq!(recipes[1].servings, 4);
}

#[test]
fn prose_only_answer_reports_no_recipes() {
    let raw = "I'd suggest making a simple stir fry with those ingredients. \
               Heat some oil, add the vegetables, season well.";
    assert!(matches!(
        parse_suggestions(raw),
        Err(SuggestionError::NoRecipesFound)
    ));
}

#[test]
fn truncated_answer_reports_malformed_data() {
    // The model ran out of tokens mid-array but an inner `]` still closes
    // the greedy match
    let raw = r#"[{"name":"Salad","ingredients":["lettuce"]"#;
    assert!(matches!(
        parse_suggestions(raw),
        Err(SuggestionError::MalformedData(_))
    ));
}

#[test]
fn sparse_elements_are_normalized_not_rejected() {
    let raw = r#"[{"name":"Plain Rice"},{"description":"no name given","servings":"three"}]"#;
    let recipes = parse_suggestions(raw).unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, "recipe-0");
    assert!(recipes[0].ingredients.is_empty());
    assert!(recipes[0].instructions.is_empty());

    assert_eq!(recipes[1].id, "recipe-1");
    assert!(recipes[1].name.is_empty());
    assert_eq!(recipes[1].servings, 0);
}

#[test]
fn prompt_lists_every_ingredient() {
    let pantry = vec![
        PantryIngredient::new("potato", "1", "kg"),
        PantryIngredient::new("onion", "2", "piece"),
        PantryIngredient::new("cheese", "200", "g"),
    ];

    let prompt = build_prompt(&pantry);
    assert!(prompt.contains("1 kg potato"));
    assert!(prompt.contains("2 piece onion"));
    assert!(prompt.contains("200 g cheese"));
    assert!(prompt.contains("potato, onion, cheese"));
    assert!(prompt.contains("cookingTime"));
}
