use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, reconciliation::flow::CookFlow};

use super::{
    entities::{MealType, RecipeSuggestion, SavedRecipe},
    value_objects::{RecipeBatch, SaveRecipeInput},
};

/// The remote recommender.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeGenerator: Send + Sync {
    fn generate(
        &self,
        meal_type: MealType,
    ) -> impl Future<Output = Result<Vec<RecipeSuggestion>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SavedRecipeRepository: Send + Sync {
    fn fetch_saved(&self) -> impl Future<Output = Result<Vec<SavedRecipe>, CoreError>> + Send;

    fn save(
        &self,
        input: SaveRecipeInput,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn delete_saved(
        &self,
        recipe_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait RecipeService: Send + Sync {
    /// Cached recipes for `meal_type` while fresh, otherwise a new generation.
    /// `refresh` skips the cache.
    fn recipes_for(
        &self,
        meal_type: MealType,
        refresh: bool,
    ) -> impl Future<Output = Result<RecipeBatch, CoreError>> + Send;

    fn save_recipe(
        &self,
        recipe: RecipeSuggestion,
        meal_type: MealType,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn saved_recipes(&self) -> impl Future<Output = Result<Vec<SavedRecipe>, CoreError>> + Send;

    fn delete_saved_recipe(
        &self,
        recipe_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Selects `recipe` and reconciles it against the current fridge.
    fn plan_cooking(
        &self,
        recipe: RecipeSuggestion,
    ) -> impl Future<Output = Result<CookFlow, CoreError>> + Send;
}
