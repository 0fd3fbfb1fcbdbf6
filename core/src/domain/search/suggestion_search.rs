use std::sync::Arc;

use tokio::{
    sync::mpsc,
    task::AbortHandle,
    time::{Instant, sleep, sleep_until},
};
use tracing::{debug, instrument};

use crate::domain::{
    cache::NutritionCache,
    calories::ports::CalorieLogRepository,
    common::{SearchConfig, ports::Clock, services::Service},
    ingredient::{
        ports::IngredientRepository, services::cached_nutrition_lookup,
        value_objects::NutritionQuery,
    },
    preferences::ports::PreferenceRepository,
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::ports::AuthGateway,
};

use super::entities::SearchEvent;

/// Debounced ingredient-name search. Each input supersedes the previous one: its
/// task is aborted before it can issue a request, so only the last input is ever
/// looked up. Results arrive on the receiver returned by [`SuggestionSearch::new`].
pub struct SuggestionSearch<I, C>
where
    I: IngredientRepository + 'static,
    C: Clock + 'static,
{
    repository: Arc<I>,
    nutrition_cache: Arc<NutritionCache<C>>,
    config: SearchConfig,
    events: mpsc::UnboundedSender<SearchEvent>,
    pending: Option<AbortHandle>,
}

impl<I, C> SuggestionSearch<I, C>
where
    I: IngredientRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(
        repository: Arc<I>,
        nutrition_cache: Arc<NutritionCache<C>>,
        config: SearchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let search = Self {
            repository,
            nutrition_cache,
            config,
            events,
            pending: None,
        };
        (search, receiver)
    }

    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, query: &str) {
        self.cancel();

        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let task = tokio::spawn(run_search(
            self.repository.clone(),
            self.nutrition_cache.clone(),
            self.config.clone(),
            self.events.clone(),
            query.to_string(),
        ));
        self.pending = Some(task.abort_handle());
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<I, C> Drop for SuggestionSearch<I, C>
where
    I: IngredientRepository + 'static,
    C: Clock + 'static,
{
    fn drop(&mut self) {
        self.cancel();
    }
}

#[instrument(skip(repository, nutrition_cache, config, events))]
async fn run_search<I, C>(
    repository: Arc<I>,
    nutrition_cache: Arc<NutritionCache<C>>,
    config: SearchConfig,
    events: mpsc::UnboundedSender<SearchEvent>,
    query: String,
) where
    I: IngredientRepository,
    C: Clock,
{
    let typed_at = Instant::now();
    sleep(config.debounce).await;

    let event = match repository.search_common(query.clone()).await {
        Ok(suggestions) if suggestions.is_empty() => None,
        Ok(suggestions) => Some(SearchEvent::Suggestions {
            query: query.clone(),
            suggestions,
        }),
        Err(error) => Some(SearchEvent::Failed {
            query: query.clone(),
            error,
        }),
    };
    if let Some(event) = event {
        publish(&events, event);
        return;
    }

    publish(
        &events,
        SearchEvent::Suggestions {
            query: query.clone(),
            suggestions: Vec::new(),
        },
    );

    sleep_until(typed_at + config.fallback_delay).await;
    debug!("No suggestions, falling back to nutrition lookup");

    let event = match cached_nutrition_lookup(
        repository.as_ref(),
        &nutrition_cache,
        NutritionQuery::new(query.clone()),
    )
    .await
    {
        Ok(lookup) => SearchEvent::Nutrition { query, lookup },
        Err(error) => SearchEvent::Failed { query, error },
    };
    publish(&events, event);
}

fn publish(events: &mpsc::UnboundedSender<SearchEvent>, event: SearchEvent) {
    if events.send(event).is_err() {
        debug!("Search results dropped, nobody is listening");
    }
}

impl<A, I, RG, SR, P, CL, C> Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository + 'static,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock + 'static,
{
    /// A search sharing this service's repository and nutrition cache.
    pub fn suggestion_search(
        &self,
        config: SearchConfig,
    ) -> (SuggestionSearch<I, C>, mpsc::UnboundedReceiver<SearchEvent>) {
        SuggestionSearch::new(
            self.ingredient_repository.clone(),
            self.nutrition_cache.clone(),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;
    use tokio::time::timeout;

    use super::*;
    use crate::domain::{
        common::{
            entities::app_errors::CoreError,
            testing::{Mocks, harness, ready},
        },
        ingredient::entities::{IngredientSuggestion, NutritionFacts, NutritionLookup},
    };

    fn chicken() -> IngredientSuggestion {
        IngredientSuggestion {
            id: "c1".to_string(),
            name: "Chicken Breast".to_string(),
            unit: "g".to_string(),
            nutrition: NutritionFacts {
                calories: 165.0,
                protein: 31.0,
                carbs: 0.0,
                fat: 3.6,
            },
            category: Some("Meat".to_string()),
            is_custom: false,
        }
    }

    fn dragonfruit() -> NutritionFacts {
        NutritionFacts {
            calories: 60.0,
            protein: 1.2,
            carbs: 13.0,
            fat: 0.0,
        }
    }

    /// Catalogue without matches and an AI lookup that always succeeds.
    fn fallback_mocks() -> Mocks {
        let mut mocks = Mocks::default();
        mocks
            .ingredients
            .expect_search_common()
            .returning(|_| ready(Ok(Vec::new())));
        mocks
            .ingredients
            .expect_fetch_nutrition()
            .returning(|_| ready(Ok(NutritionLookup::Found(dragonfruit()))));
        mocks
    }

    async fn next_event(events: &mut mpsc::UnboundedReceiver<SearchEvent>) -> SearchEvent {
        timeout(Duration::from_secs(10), events.recv())
            .await
            .ok()
            .flatten()
            .expect("search event")
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_fetches_once_with_final_value() {
        let mut mocks = Mocks::default();
        mocks
            .ingredients
            .expect_search_common()
            .with(eq("chicken".to_string()))
            .times(1)
            .returning(|_| ready(Ok(vec![chicken()])));
        let h = harness(mocks);
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        for partial in ["c", "ch", "chi", "chicken"] {
            search.input(partial);
            sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(
            next_event(&mut events).await,
            SearchEvent::Suggestions {
                query: "chicken".to_string(),
                suggestions: vec![chicken()],
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let mut mocks = Mocks::default();
        mocks
            .ingredients
            .expect_search_common()
            .times(1)
            .returning(|_| ready(Ok(vec![chicken()])));
        let h = harness(mocks);
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        let start = Instant::now();
        search.input("chick");
        assert!(search.is_pending());

        next_event(&mut events).await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(300));
        assert!(waited < Duration::from_millis(310));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_only_without_suggestions() {
        let h = harness(fallback_mocks());
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        let start = Instant::now();
        search.input("Dragonfruit");

        let first = next_event(&mut events).await;
        assert!(matches!(
            first,
            SearchEvent::Suggestions { ref suggestions, .. } if suggestions.is_empty()
        ));

        let second = next_event(&mut events).await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(1500));
        assert!(waited < Duration::from_millis(1510));
        assert_eq!(
            second,
            SearchEvent::Nutrition {
                query: "Dragonfruit".to_string(),
                lookup: NutritionLookup::Found(dragonfruit()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fallback_when_suggestions_found() {
        let mut mocks = Mocks::default();
        mocks
            .ingredients
            .expect_search_common()
            .returning(|_| ready(Ok(vec![chicken()])));
        mocks
            .ingredients
            .expect_fetch_nutrition()
            .returning(|_| ready(Ok(NutritionLookup::Found(dragonfruit()))));
        let h = harness(mocks);
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        search.input("chicken");
        next_event(&mut events).await;
        sleep(Duration::from_secs(3)).await;

        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_cancels_pending_fallback() {
        let h = harness(fallback_mocks());
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        search.input("Dragon");
        next_event(&mut events).await;
        // Past the debounce, still inside the fallback window.
        search.input("");
        sleep(Duration::from_secs(3)).await;

        assert!(events.try_recv().is_err());
        assert!(!search.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_debounce_sends_nothing() {
        let h = harness(fallback_mocks());
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        search.input("egg");
        sleep(Duration::from_millis(299)).await;
        search.cancel();
        sleep(Duration::from_secs(3)).await;

        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_published() {
        let mut mocks = Mocks::default();
        mocks
            .ingredients
            .expect_search_common()
            .returning(|_| ready(Err(CoreError::SessionExpired)));
        let h = harness(mocks);
        let (mut search, mut events) = h.service.suggestion_search(SearchConfig::default());

        search.input("egg");
        assert_eq!(
            next_event(&mut events).await,
            SearchEvent::Failed {
                query: "egg".to_string(),
                error: CoreError::SessionExpired,
            }
        );
    }
}
