//! # Meal Planning and Shopping-List Aggregation
//!
//! This module models the weekly meal plan and merges the ingredient lists of
//! every planned recipe into a single shopping list.
//!
//! ## Core Concepts
//!
//! - **PlannedMeal**: A recipe assigned to a calendar day and meal slot
//! - **Aggregation**: Summing ingredient quantities keyed by `(name, unit)`
//! - **Week window**: Sunday-based, seven consecutive days
//!
//! Aggregation keys are exact, case-sensitive strings with no unit
//! normalization: "g" and "grams" are distinct keys. That mirrors the product
//! behaviour and is intentional, not a defect.
//!
//! ## Usage
//!
//! ```rust
//! use snackit::meal_plan::{aggregate, PlannedMeal, MealSlot, Recipe, RecipeIngredient};
//! use chrono::NaiveDate;
//!
//! let recipe = Recipe::new("r1", "Pancakes")
//!     .with_ingredient(RecipeIngredient::new("flour", 200.0, "g"));
//! let meal = PlannedMeal {
//!     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
//!     slot: MealSlot::Breakfast,
//!     recipe: Some(recipe),
//! };
//!
//! let list = aggregate(&[meal]);
//! assert_eq!(list[0].quantity, 200.0);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The four meal slots of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    /// All slots in display order
    pub fn all() -> [MealSlot; 4] {
        [
            MealSlot::Breakfast,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snack,
        ]
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        };
        write!(f, "{name}")
    }
}

/// Recipe difficulty levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// One ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Optional ingredients still count toward the shopping list
    #[serde(default)]
    pub optional: bool,
}

impl RecipeIngredient {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            optional: false,
        }
    }
}

/// A stored recipe, read-only from the planner's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub servings: u32,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Create a recipe with just an id and title
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            cuisine: String::new(),
            difficulty: Difficulty::Easy,
            servings: 0,
            cooking_time: 0,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Append an ingredient
    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

/// A recipe assigned to a day and meal slot.
///
/// `recipe` is `None` when the plan references a recipe that no longer
/// resolves; such meals are skipped by aggregation. At most one meal is
/// expected per `(date, slot)`; the writer enforces last-write-wins upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe: Option<Recipe>,
}

/// An ingredient summed across every recipe in the plan window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedIngredient {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
}

/// One row of the generated shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub purchased: bool,
}

/// Merge the ingredient lists of every planned meal with a resolved recipe.
///
/// Quantities accumulate by plain addition under the exact `(name, unit)`
/// key. Output order is the insertion order of first encounter, which keeps
/// the result deterministic for a given plan.
pub fn aggregate(meals: &[PlannedMeal]) -> Vec<AggregatedIngredient> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut merged: Vec<AggregatedIngredient> = Vec::new();

    for meal in meals {
        let Some(recipe) = &meal.recipe else {
            continue;
        };
        for ingredient in &recipe.ingredients {
            let key = (ingredient.name.clone(), ingredient.unit.clone());
            match index.get(&key) {
                Some(&i) => merged[i].quantity += ingredient.quantity,
                None => {
                    index.insert(key, merged.len());
                    merged.push(AggregatedIngredient {
                        name: ingredient.name.clone(),
                        unit: ingredient.unit.clone(),
                        quantity: ingredient.quantity,
                    });
                }
            }
        }
    }

    merged
}

/// Turn aggregated ingredients into shopping-list rows. Generated rows land
/// in the catch-all "other" category and start unpurchased; persisting them
/// is the caller's concern.
pub fn to_shopping_list(ingredients: &[AggregatedIngredient]) -> Vec<ShoppingListItem> {
    ingredients
        .iter()
        .map(|ing| ShoppingListItem {
            name: ing.name.clone(),
            quantity: ing.quantity,
            unit: ing.unit.clone(),
            category: "other".to_string(),
            purchased: false,
        })
        .collect()
}

/// The Sunday that starts the week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date - Days::new(back)
}

/// The Saturday that ends the week containing `date`
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Days::new(6)
}

/// The seven dates of the week containing `date`, Sunday first
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let start = start_of_week(date);
    (0..7).map(|i| start + Days::new(i)).collect()
}

/// The planned meal occupying the given `(date, slot)` cell, if any
pub fn meal_for_slot(meals: &[PlannedMeal], date: NaiveDate, slot: MealSlot) -> Option<&PlannedMeal> {
    meals
        .iter()
        .find(|meal| meal.date == date && meal.slot == slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn recipe_a() -> Recipe {
        Recipe::new("a", "Pancakes")
            .with_ingredient(RecipeIngredient::new("flour", 200.0, "g"))
            .with_ingredient(RecipeIngredient::new("egg", 2.0, "piece"))
    }

    fn recipe_b() -> Recipe {
        Recipe::new("b", "Porridge")
            .with_ingredient(RecipeIngredient::new("flour", 100.0, "g"))
            .with_ingredient(RecipeIngredient::new("milk", 1.0, "cup"))
    }

    #[test]
    fn test_aggregate_merges_matching_keys() {
        let meals = vec![
            PlannedMeal {
                date: day(3),
                slot: MealSlot::Breakfast,
                recipe: Some(recipe_a()),
            },
            PlannedMeal {
                date: day(4),
                slot: MealSlot::Breakfast,
                recipe: Some(recipe_b()),
            },
        ];

        let list = aggregate(&meals);
        assert_eq!(list.len(), 3);

        assert_eq!(list[0].name, "flour");
        assert_eq!(list[0].unit, "g");
        assert_eq!(list[0].quantity, 300.0);

        assert_eq!(list[1].name, "egg");
        assert_eq!(list[1].quantity, 2.0);

        assert_eq!(list[2].name, "milk");
        assert_eq!(list[2].unit, "cup");
        assert_eq!(list[2].quantity, 1.0);
    }

    #[test]
    fn test_aggregate_skips_unresolved_recipes() {
        let meals = vec![
            PlannedMeal {
                date: day(3),
                slot: MealSlot::Lunch,
                recipe: None,
            },
            PlannedMeal {
                date: day(3),
                slot: MealSlot::Dinner,
                recipe: Some(recipe_a()),
            },
        ];

        let list = aggregate(&meals);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_aggregate_units_are_not_normalized() {
        let recipe = Recipe::new("c", "Mixed units")
            .with_ingredient(RecipeIngredient::new("flour", 1.0, "g"))
            .with_ingredient(RecipeIngredient::new("flour", 1.0, "grams"));
        let meals = vec![PlannedMeal {
            date: day(5),
            slot: MealSlot::Snack,
            recipe: Some(recipe),
        }];

        let list = aggregate(&meals);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_aggregate_empty_plan() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_to_shopping_list_defaults() {
        let list = to_shopping_list(&[AggregatedIngredient {
            name: "flour".to_string(),
            unit: "g".to_string(),
            quantity: 300.0,
        }]);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category, "other");
        assert!(!list[0].purchased);
        assert_eq!(list[0].quantity, 300.0);
    }

    #[test]
    fn test_week_window() {
        // 2024-06-05 is a Wednesday
        let wednesday = day(5);
        let start = start_of_week(wednesday);
        let end = end_of_week(wednesday);

        assert_eq!(start, day(2)); // Sunday
        assert_eq!(end, day(8)); // Saturday

        let dates = week_dates(wednesday);
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], start);
        assert_eq!(dates[6], end);
        assert!(dates.contains(&wednesday));
    }

    #[test]
    fn test_start_of_week_on_sunday_is_identity() {
        let sunday = day(2);
        assert_eq!(start_of_week(sunday), sunday);
    }

    #[test]
    fn test_meal_for_slot_lookup() {
        let meals = vec![PlannedMeal {
            date: day(3),
            slot: MealSlot::Dinner,
            recipe: Some(recipe_a()),
        }];

        assert!(meal_for_slot(&meals, day(3), MealSlot::Dinner).is_some());
        assert!(meal_for_slot(&meals, day(3), MealSlot::Lunch).is_none());
        assert!(meal_for_slot(&meals, day(4), MealSlot::Dinner).is_none());
    }
}
