use serde::Serialize;

use super::entities::{MealType, RecipeSuggestion};

#[derive(Debug, Clone, Serialize)]
pub struct SaveRecipeInput {
    #[serde(flatten)]
    pub recipe: RecipeSuggestion,
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
}

/// Recipes for a meal type and whether they came from the local cache.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeBatch {
    pub meal_type: MealType,
    pub recipes: Vec<RecipeSuggestion>,
    pub from_cache: bool,
}
