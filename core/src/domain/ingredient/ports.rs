use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::{
    entities::{Ingredient, IngredientSuggestion, NutritionLookup},
    value_objects::{IngredientInput, IngredientPatch, NutritionQuery},
};

/// Remote inventory and ingredient lookup endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientRepository: Send + Sync {
    fn fetch_ingredients(&self) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;

    fn create_ingredient(
        &self,
        input: IngredientInput,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn update_ingredient(
        &self,
        ingredient_id: String,
        patch: IngredientPatch,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn delete_ingredient(
        &self,
        ingredient_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Common catalogue plus the user's own ingredients whose name contains `query`.
    fn search_common(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<IngredientSuggestion>, CoreError>> + Send;

    /// Free text ("I bought 2 eggs and a litre of milk") to structured rows.
    fn parse_text(
        &self,
        text: String,
    ) -> impl Future<Output = Result<Vec<IngredientInput>, CoreError>> + Send;

    fn fetch_nutrition(
        &self,
        query: NutritionQuery,
    ) -> impl Future<Output = Result<NutritionLookup, CoreError>> + Send;
}

/// Fridge management as the front end sees it: input is validated before any
/// request goes out and nutrition lookups go through the local cache.
pub trait InventoryService: Send + Sync {
    fn list_fridge(&self) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;

    fn add_to_fridge(
        &self,
        input: IngredientInput,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn edit_ingredient(
        &self,
        ingredient_id: String,
        patch: IngredientPatch,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn remove_ingredient(
        &self,
        ingredient_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn search_suggestions(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<IngredientSuggestion>, CoreError>> + Send;

    fn parse_ingredients(
        &self,
        text: String,
    ) -> impl Future<Output = Result<Vec<IngredientInput>, CoreError>> + Send;

    fn lookup_nutrition(
        &self,
        query: NutritionQuery,
    ) -> impl Future<Output = Result<NutritionLookup, CoreError>> + Send;
}
