use tracing::{debug, info, instrument};

use crate::domain::{
    calories::ports::CalorieLogRepository,
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    ingredient::ports::IngredientRepository,
    preferences::ports::PreferenceRepository,
    reconciliation::flow::CookFlow,
    recipe::{
        entities::{MealType, RecipeSuggestion, SavedRecipe},
        ports::{RecipeGenerator, RecipeService, SavedRecipeRepository},
        value_objects::{RecipeBatch, SaveRecipeInput},
    },
    session::ports::AuthGateway,
};

impl<A, I, RG, SR, P, CL, C> RecipeService for Service<A, I, RG, SR, P, CL, C>
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
    async fn recipes_for(
        &self,
        meal_type: MealType,
        refresh: bool,
    ) -> Result<RecipeBatch, CoreError> {
        if refresh {
            self.recipe_cache.invalidate(meal_type);
        } else if let Some(recipes) = self.recipe_cache.get(meal_type) {
            debug!(count = recipes.len(), "Serving cached recipes");
            return Ok(RecipeBatch {
                meal_type,
                recipes,
                from_cache: true,
            });
        }

        let recipes = self.recipe_generator.generate(meal_type).await?;
        // An empty answer is not cached so the next visit asks again.
        if !recipes.is_empty() {
            self.recipe_cache.put(meal_type, &recipes);
        }
        info!(count = recipes.len(), "Generated recipes");

        Ok(RecipeBatch {
            meal_type,
            recipes,
            from_cache: false,
        })
    }

    #[instrument(skip(self, recipe), fields(recipe = %recipe.name))]
    async fn save_recipe(
        &self,
        recipe: RecipeSuggestion,
        meal_type: MealType,
    ) -> Result<SavedRecipe, CoreError> {
        if recipe.name.trim().is_empty() {
            return Err(CoreError::Validation("Recipe name is required".to_string()));
        }
        let saved = self
            .saved_recipe_repository
            .save(SaveRecipeInput { recipe, meal_type })
            .await?;
        info!(saved_id = %saved.id, "Recipe saved");
        Ok(saved)
    }

    async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, CoreError> {
        self.saved_recipe_repository.fetch_saved().await
    }

    #[instrument(skip(self))]
    async fn delete_saved_recipe(&self, recipe_id: String) -> Result<(), CoreError> {
        self.saved_recipe_repository.delete_saved(recipe_id).await
    }

    #[instrument(skip(self, recipe), fields(recipe = %recipe.name))]
    async fn plan_cooking(&self, recipe: RecipeSuggestion) -> Result<CookFlow, CoreError> {
        let mut flow = CookFlow::new();
        flow.select(recipe)?;

        let inventory = self.ingredient_repository.fetch_ingredients().await?;
        let plan = flow.reconcile(&inventory)?;
        debug!(entries = plan.len(), "Deduction plan built");
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::domain::{
        cache::RecipeCache,
        common::{
            ports::KeyValueStore,
            testing::{Mocks, harness, ready},
        },
        ingredient::entities::Ingredient,
        recipe::entities::RecipeIngredient,
        reconciliation::flow::CookState,
    };
    use crate::infrastructure::clock::ManualClock;

    fn salad() -> RecipeSuggestion {
        RecipeSuggestion {
            name: "Chicken Salad".to_string(),
            available_ingredients: vec![
                RecipeIngredient::new("Chicken Breast", "200", "g"),
                RecipeIngredient::new("Beef", "100", "g"),
            ],
            ..Default::default()
        }
    }

    fn generates(mocks: &mut Mocks, meal_type: MealType, times: usize) {
        mocks
            .recipes
            .expect_generate()
            .with(eq(meal_type))
            .times(times)
            .returning(|_| ready(Ok(vec![salad()])));
    }

    #[tokio::test]
    async fn test_lunch_cache_hit_then_expiry() {
        let mut mocks = Mocks::default();
        generates(&mut mocks, MealType::Lunch, 2);
        let h = harness(mocks);

        let first = h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(!first.from_cache);
        let key = RecipeCache::<ManualClock>::key(MealType::Lunch);
        assert!(h.store.get(&key).unwrap().is_some());

        h.clock.advance(TimeDelta::minutes(30));
        let second = h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.recipes, first.recipes);

        h.clock.advance(TimeDelta::minutes(31));
        let third = h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(!third.from_cache);
    }

    #[tokio::test]
    async fn test_meal_types_are_cached_separately() {
        let mut mocks = Mocks::default();
        generates(&mut mocks, MealType::Lunch, 1);
        generates(&mut mocks, MealType::Dinner, 1);
        let h = harness(mocks);

        h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        let dinner = h.service.recipes_for(MealType::Dinner, false).await.unwrap();
        assert!(!dinner.from_cache);
        let lunch = h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(lunch.from_cache);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let mut mocks = Mocks::default();
        generates(&mut mocks, MealType::Snack, 2);
        let h = harness(mocks);

        h.service.recipes_for(MealType::Snack, false).await.unwrap();
        let refreshed = h.service.recipes_for(MealType::Snack, true).await.unwrap();
        assert!(!refreshed.from_cache);
    }

    #[tokio::test]
    async fn test_empty_generation_is_not_cached() {
        let mut mocks = Mocks::default();
        mocks
            .recipes
            .expect_generate()
            .times(2)
            .returning(|_| ready(Ok(Vec::new())));
        let h = harness(mocks);

        h.service.recipes_for(MealType::Breakfast, false).await.unwrap();
        let again = h.service.recipes_for(MealType::Breakfast, false).await.unwrap();
        assert!(!again.from_cache);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let mut mocks = Mocks::default();
        mocks
            .recipes
            .expect_generate()
            .returning(|_| ready(Err(CoreError::SessionExpired)));
        let h = harness(mocks);

        let err = h
            .service
            .recipes_for(MealType::Lunch, false)
            .await
            .unwrap_err();
        assert!(err.requires_login());
        let key = RecipeCache::<ManualClock>::key(MealType::Lunch);
        assert_eq!(h.store.get(&key).unwrap(), None);
    }

    #[tokio::test]
    async fn test_saving_twice_conflicts() {
        let mut mocks = Mocks::default();
        let mut seq = Sequence::new();
        mocks
            .saved
            .expect_save()
            .withf(|input| {
                input.recipe.name == "Chicken Salad" && input.meal_type == MealType::Lunch
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|input| {
                ready(Ok(SavedRecipe {
                    id: "s1".to_string(),
                    recipe: input.recipe,
                    meal_type: input.meal_type.to_string(),
                    saved_at: None,
                }))
            });
        mocks
            .saved
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ready(Err(CoreError::Conflict("Recipe already saved".to_string()))));
        mocks
            .saved
            .expect_delete_saved()
            .with(eq("s1".to_string()))
            .times(1)
            .returning(|_| ready(Ok(())));
        mocks
            .saved
            .expect_fetch_saved()
            .returning(|| ready(Ok(Vec::new())));
        let h = harness(mocks);

        let saved = h
            .service
            .save_recipe(salad(), MealType::Lunch)
            .await
            .unwrap();
        assert_eq!(saved.meal_type, "Lunch");

        let err = h
            .service
            .save_recipe(salad(), MealType::Lunch)
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::Conflict("Recipe already saved".to_string()));

        h.service.delete_saved_recipe(saved.id).await.unwrap();
        assert!(h.service.saved_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plan_cooking_against_fridge() {
        let mut mocks = Mocks::default();
        mocks.ingredients.expect_fetch_ingredients().times(1).returning(|| {
            ready(Ok(vec![Ingredient {
                id: "i1".to_string(),
                name: "Chicken".to_string(),
                quantity: "500".to_string(),
                unit: "g".to_string(),
                expiry_date: None,
                nutrition: None,
            }]))
        });
        let h = harness(mocks);

        let flow = h.service.plan_cooking(salad()).await.unwrap();
        assert!(matches!(flow.state(), CookState::ReconciliationBuilt { .. }));

        let plan = flow.plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries()[0].matched.id, "i1");
        assert_eq!(plan.entries()[0].deduct_quantity, "200");
    }
}
