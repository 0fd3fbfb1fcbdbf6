use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::domain::{
    cache::{NutritionCache, RecipeCache},
    calories::ports::MockCalorieLogRepository,
    common::{CacheConfig, services::Service},
    ingredient::ports::MockIngredientRepository,
    preferences::ports::MockPreferenceRepository,
    recipe::ports::{MockRecipeGenerator, MockSavedRecipeRepository},
    session::{entities::Session, manager::SessionManager, ports::MockAuthGateway},
};
use crate::infrastructure::{clock::ManualClock, storage::MemoryStore};

/// Return value for a mocked gateway call.
pub(crate) fn ready<T: Send + 'static>(value: T) -> Pin<Box<dyn Future<Output = T> + Send>> {
    Box::pin(std::future::ready(value))
}

/// Gateway mocks, one per service slot. Calls without a matching expectation panic.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthGateway,
    pub ingredients: MockIngredientRepository,
    pub recipes: MockRecipeGenerator,
    pub saved: MockSavedRecipeRepository,
    pub preferences: MockPreferenceRepository,
    pub calories: MockCalorieLogRepository,
}

pub(crate) type TestService = Service<
    MockAuthGateway,
    MockIngredientRepository,
    MockRecipeGenerator,
    MockSavedRecipeRepository,
    MockPreferenceRepository,
    MockCalorieLogRepository,
    ManualClock,
>;

pub(crate) struct Harness {
    pub service: TestService,
    pub clock: ManualClock,
    pub store: Arc<MemoryStore>,
}

/// A service over `mocks` with a logged-in session, a fresh in-memory store and a
/// clock frozen at 2025-06-01 12:00 UTC.
pub(crate) fn harness(mocks: Mocks) -> Harness {
    let store = Arc::new(MemoryStore::default());
    let session = Arc::new(SessionManager::load(store.clone()));
    session
        .begin(Session::new("t".to_string(), None))
        .expect("session starts");

    let clock = ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant"),
    );
    let cache = CacheConfig::default();
    let service = Service::new(
        mocks.auth,
        mocks.ingredients,
        mocks.recipes,
        mocks.saved,
        mocks.preferences,
        mocks.calories,
        session,
        RecipeCache::new(store.clone(), clock.clone(), cache.recipe_ttl),
        NutritionCache::new(store.clone(), clock.clone(), cache.nutrition_ttl),
    );

    Harness {
        service,
        clock,
        store,
    }
}
