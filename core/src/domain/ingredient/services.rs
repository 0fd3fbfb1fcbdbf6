use tracing::{debug, info, instrument, warn};

use crate::domain::{
    cache::NutritionCache,
    calories::ports::CalorieLogRepository,
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    ingredient::{
        entities::{Ingredient, IngredientSuggestion, NutritionLookup},
        ports::{IngredientRepository, InventoryService},
        value_objects::{IngredientInput, IngredientPatch, NutritionQuery},
    },
    preferences::ports::PreferenceRepository,
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::ports::AuthGateway,
};

/// Nutrition for `query`, served from the local cache while fresh. Only found
/// facts are cached; a rate-limited answer is passed through untouched.
pub(crate) async fn cached_nutrition_lookup<I, C>(
    repository: &I,
    cache: &NutritionCache<C>,
    query: NutritionQuery,
) -> Result<NutritionLookup, CoreError>
where
    I: IngredientRepository,
    C: Clock,
{
    if query.name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Ingredient name is required".to_string(),
        ));
    }

    if let Some(facts) = cache.get(&query) {
        debug!(key = %query.cache_key(), "Nutrition cache hit");
        return Ok(NutritionLookup::Found(facts));
    }

    let lookup = repository.fetch_nutrition(query.clone()).await?;
    match &lookup {
        NutritionLookup::Found(facts) => cache.put(&query, facts),
        NutritionLookup::RateLimited { message } => warn!("{}", message),
    }
    Ok(lookup)
}

impl<A, I, RG, SR, P, CL, C> InventoryService for Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    #[instrument(skip(self))]
    async fn list_fridge(&self) -> Result<Vec<Ingredient>, CoreError> {
        self.ingredient_repository.fetch_ingredients().await
    }

    #[instrument(skip(self), fields(name = %input.name))]
    async fn add_to_fridge(&self, input: IngredientInput) -> Result<Ingredient, CoreError> {
        input.validate()?;
        let ingredient = self.ingredient_repository.create_ingredient(input).await?;
        info!(ingredient_id = %ingredient.id, "Ingredient added");
        Ok(ingredient)
    }

    #[instrument(skip(self))]
    async fn edit_ingredient(
        &self,
        ingredient_id: String,
        patch: IngredientPatch,
    ) -> Result<Ingredient, CoreError> {
        patch.validate()?;
        self.ingredient_repository
            .update_ingredient(ingredient_id, patch)
            .await
    }

    #[instrument(skip(self))]
    async fn remove_ingredient(&self, ingredient_id: String) -> Result<(), CoreError> {
        self.ingredient_repository
            .delete_ingredient(ingredient_id)
            .await?;
        info!("Ingredient removed");
        Ok(())
    }

    async fn search_suggestions(
        &self,
        query: String,
    ) -> Result<Vec<IngredientSuggestion>, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.ingredient_repository
            .search_common(query.to_string())
            .await
    }

    #[instrument(skip(self, text))]
    async fn parse_ingredients(&self, text: String) -> Result<Vec<IngredientInput>, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::Validation(
                "Please enter some text to parse".to_string(),
            ));
        }
        let parsed = self.ingredient_repository.parse_text(text).await?;
        debug!(count = parsed.len(), "Parsed ingredients");
        Ok(parsed)
    }

    async fn lookup_nutrition(&self, query: NutritionQuery) -> Result<NutritionLookup, CoreError> {
        cached_nutrition_lookup(
            self.ingredient_repository.as_ref(),
            &self.nutrition_cache,
            query,
        )
        .await
    }
}
