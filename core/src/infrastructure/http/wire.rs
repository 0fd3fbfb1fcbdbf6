use serde::{Deserialize, Serialize};

use crate::domain::{
    ingredient::value_objects::IngredientInput, recipe::entities::MealType,
    recipe::entities::RecipeSuggestion,
};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRecipesRequest {
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRecipesResponse {
    #[serde(default)]
    pub recipes: Vec<RecipeSuggestion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ParseIngredientsRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParseIngredientsResponse {
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

/// The `{error, message}` body every failing endpoint answers with.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn is_rate_limit(&self) -> bool {
        self.error.as_deref() == Some(RATE_LIMIT)
    }
}

pub(crate) const RATE_LIMIT: &str = "rate_limit";
pub(crate) const RATE_LIMIT_MESSAGE: &str = "API rate limit reached. Please try again later.";
