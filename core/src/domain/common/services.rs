use std::sync::Arc;

use crate::domain::{
    cache::{NutritionCache, RecipeCache},
    calories::ports::CalorieLogRepository,
    common::ports::Clock,
    ingredient::ports::IngredientRepository,
    preferences::ports::PreferenceRepository,
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::{manager::SessionManager, ports::AuthGateway},
};

/// Wires the gateways, the session and the local caches together. Each service
/// trait is implemented for it in its own domain module.
pub struct Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    pub(crate) auth_gateway: A,
    pub(crate) ingredient_repository: Arc<I>,
    pub(crate) recipe_generator: RG,
    pub(crate) saved_recipe_repository: SR,
    pub(crate) preference_repository: P,
    pub(crate) calorie_log_repository: CL,
    pub(crate) session: Arc<SessionManager>,
    pub(crate) recipe_cache: RecipeCache<C>,
    pub(crate) nutrition_cache: Arc<NutritionCache<C>>,
}

impl<A, I, RG, SR, P, CL, C> Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_gateway: A,
        ingredient_repository: I,
        recipe_generator: RG,
        saved_recipe_repository: SR,
        preference_repository: P,
        calorie_log_repository: CL,
        session: Arc<SessionManager>,
        recipe_cache: RecipeCache<C>,
        nutrition_cache: NutritionCache<C>,
    ) -> Self {
        Self {
            auth_gateway,
            ingredient_repository: Arc::new(ingredient_repository),
            recipe_generator,
            saved_recipe_repository,
            preference_repository,
            calorie_log_repository,
            session,
            recipe_cache,
            nutrition_cache: Arc::new(nutrition_cache),
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn recipe_cache(&self) -> &RecipeCache<C> {
        &self.recipe_cache
    }
}
