use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
    common::{
        ports::{Clock, KeyValueStore},
        timestamp_millis,
    },
    recipe::entities::{MealType, RecipeSuggestion},
};

use super::{entities::CacheEntry, is_fresh};

/// Generated recipes per meal type, valid for one TTL window from the time they
/// were stored. Expired or unreadable entries read as absent.
pub struct RecipeCache<C: Clock> {
    store: Arc<dyn KeyValueStore>,
    clock: C,
    ttl: Duration,
}

impl<C: Clock> RecipeCache<C> {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: C, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    pub fn key(meal_type: MealType) -> String {
        format!("recipes_{}", meal_type)
    }

    pub fn get(&self, meal_type: MealType) -> Option<Vec<RecipeSuggestion>> {
        let key = Self::key(meal_type);
        let raw = match self.store.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Treating malformed {} as a miss: {}", key, e);
                return None;
            }
        };

        let now = timestamp_millis(self.clock.now());
        if !is_fresh(entry.timestamp, now, self.ttl) {
            debug!("{} expired", key);
            return None;
        }

        Some(entry.recipes)
    }

    /// Overwrites any previous entry for the meal type. A failed write only costs a
    /// regeneration later, so it is logged rather than returned.
    pub fn put(&self, meal_type: MealType, recipes: &[RecipeSuggestion]) {
        let key = Self::key(meal_type);
        let entry = CacheEntry {
            recipes: recipes.to_vec(),
            timestamp: timestamp_millis(self.clock.now()),
        };

        let result = serde_json::to_string(&entry)
            .map_err(|e| e.to_string())
            .and_then(|raw| self.store.set(&key, &raw).map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!("Failed to cache recipes under {}: {}", key, e);
        }
    }

    pub fn invalidate(&self, meal_type: MealType) {
        let key = Self::key(meal_type);
        if let Err(e) = self.store.remove(&key) {
            warn!("Failed to drop {}: {}", key, e);
        }
    }

    pub fn invalidate_all(&self) {
        for meal_type in MealType::ALL {
            self.invalidate(meal_type);
        }
    }
}
