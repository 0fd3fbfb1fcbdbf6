use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    domain::{
        cache::{NutritionCache, RecipeCache},
        common::{HealthyDayConfig, entities::app_errors::CoreError, services::Service},
        session::manager::SessionManager,
    },
    infrastructure::{clock::SystemClock, http::HttpApiClient, storage::FileStore},
};

pub type HealthyDayService = Service<
    HttpApiClient,
    HttpApiClient,
    HttpApiClient,
    HttpApiClient,
    HttpApiClient,
    HttpApiClient,
    SystemClock,
>;

/// Opens the local store, restores the session from it and wires one HTTP client
/// into every gateway slot.
pub fn create_service(config: HealthyDayConfig) -> Result<HealthyDayService, CoreError> {
    let store = Arc::new(FileStore::open(config.storage.store_path())?);
    debug!(path = %store.path().display(), "Local store opened");

    let session = Arc::new(SessionManager::load(store.clone()));
    let client = HttpApiClient::new(&config.api, session.clone())?;
    info!(
        api = %config.api.base_url,
        authenticated = session.is_authenticated(),
        "HealthyDay service ready"
    );

    Ok(Service::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client.clone(),
        client.clone(),
        client,
        session,
        RecipeCache::new(store.clone(), SystemClock, config.cache.recipe_ttl),
        NutritionCache::new(store, SystemClock, config.cache.nutrition_ttl),
    ))
}
