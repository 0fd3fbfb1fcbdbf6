use tracing::{info, instrument};

use crate::domain::{
    calories::ports::CalorieLogRepository,
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    ingredient::ports::IngredientRepository,
    preferences::{
        entities::Preferences,
        ports::{PreferenceRepository, PreferenceService},
    },
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::ports::AuthGateway,
};

impl<A, I, RG, SR, P, CL, C> PreferenceService for Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    async fn get_preferences(&self) -> Result<Preferences, CoreError> {
        self.preference_repository.fetch_preferences().await
    }

    #[instrument(skip(self))]
    async fn save_preferences(&self, preferences: Preferences) -> Result<Preferences, CoreError> {
        preferences.validate()?;
        let saved = self
            .preference_repository
            .update_preferences(preferences)
            .await?;
        self.recipe_cache.invalidate_all();
        info!("Preferences saved");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{
        common::testing::{Mocks, harness, ready},
        recipe::{
            entities::{MealType, RecipeSuggestion},
            ports::RecipeService,
        },
    };

    #[tokio::test]
    async fn test_invalid_preferences_never_sent() {
        let h = harness(Mocks::default());
        let prefs = Preferences {
            diet_type: "Carnivore".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            h.service.save_preferences(prefs).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_saving_drops_cached_recipes() {
        let mut mocks = Mocks::default();
        mocks
            .recipes
            .expect_generate()
            .with(eq(MealType::Dinner))
            .times(2)
            .returning(|_| {
                ready(Ok(vec![RecipeSuggestion {
                    name: "Tofu Bowl".to_string(),
                    ..Default::default()
                }]))
            });
        mocks
            .preferences
            .expect_fetch_preferences()
            .returning(|| ready(Ok(Preferences::default())));
        mocks
            .preferences
            .expect_update_preferences()
            .times(1)
            .returning(|prefs| ready(Ok(prefs)));
        let h = harness(mocks);

        h.service.recipes_for(MealType::Dinner, false).await.unwrap();

        let mut prefs = h.service.get_preferences().await.unwrap();
        prefs.diet_type = "Vegan".to_string();
        prefs.toggle_allergy("Soy");
        let saved = h.service.save_preferences(prefs).await.unwrap();
        assert_eq!(saved.allergies, vec!["Soy".to_string()]);

        let batch = h.service.recipes_for(MealType::Dinner, false).await.unwrap();
        assert!(!batch.from_cache);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cached_recipes() {
        let mut mocks = Mocks::default();
        mocks
            .recipes
            .expect_generate()
            .times(1)
            .returning(|_| ready(Ok(vec![RecipeSuggestion::default()])));
        mocks.preferences.expect_update_preferences().returning(|_| {
            ready(Err(CoreError::Network("connection refused".to_string())))
        });
        let h = harness(mocks);

        h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(
            h.service
                .save_preferences(Preferences::default())
                .await
                .is_err()
        );
        let batch = h.service.recipes_for(MealType::Lunch, false).await.unwrap();
        assert!(batch.from_cache);
    }
}
