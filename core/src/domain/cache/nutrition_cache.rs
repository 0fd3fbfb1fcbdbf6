use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
    common::{
        ports::{Clock, KeyValueStore},
        timestamp_millis,
    },
    ingredient::{entities::NutritionFacts, value_objects::NutritionQuery},
};

use super::is_fresh;

/// Per-ingredient nutrition lookups. The facts live under the query's cache key and
/// the write time under the sibling `<key>_timestamp`.
pub struct NutritionCache<C: Clock> {
    store: Arc<dyn KeyValueStore>,
    clock: C,
    ttl: Duration,
}

impl<C: Clock> NutritionCache<C> {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: C, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    fn timestamp_key(key: &str) -> String {
        format!("{}_timestamp", key)
    }

    pub fn get(&self, query: &NutritionQuery) -> Option<NutritionFacts> {
        let key = query.cache_key();
        let read = |k: &str| {
            self.store
                .get(k)
                .map_err(|e| warn!("Failed to read {}: {}", k, e))
                .ok()
                .flatten()
        };

        let raw = read(&key)?;
        let stored_at: i64 = read(&Self::timestamp_key(&key))?.trim().parse().ok()?;

        if !is_fresh(stored_at, timestamp_millis(self.clock.now()), self.ttl) {
            debug!("{} expired", key);
            return None;
        }

        serde_json::from_str(&raw)
            .map_err(|e| debug!("Treating malformed {} as a miss: {}", key, e))
            .ok()
    }

    pub fn put(&self, query: &NutritionQuery, facts: &NutritionFacts) {
        let key = query.cache_key();
        let raw = match serde_json::to_string(facts) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode nutrition for {}: {}", key, e);
                return;
            }
        };
        let stored_at = timestamp_millis(self.clock.now()).to_string();

        let result = self
            .store
            .set(&key, &raw)
            .and_then(|_| self.store.set(&Self::timestamp_key(&key), &stored_at));
        if let Err(e) = result {
            warn!("Failed to cache nutrition under {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;
    use crate::infrastructure::{clock::ManualClock, storage::MemoryStore};

    const DAY: Duration = Duration::from_secs(24 * 3600);

    fn facts() -> NutritionFacts {
        NutritionFacts {
            calories: 155.0,
            protein: 13.0,
            carbs: 1.1,
            fat: 11.0,
        }
    }

    fn setup() -> (NutritionCache<ManualClock>, Arc<MemoryStore>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 11, 2, 8, 0, 0).unwrap());
        let store = Arc::new(MemoryStore::default());
        let cache = NutritionCache::new(store.clone(), clock.clone(), DAY);
        (cache, store, clock)
    }

    #[test]
    fn test_round_trip_writes_sibling_timestamp() {
        let (cache, store, _) = setup();
        let query = NutritionQuery::new("Egg");
        cache.put(&query, &facts());

        assert_eq!(cache.get(&query), Some(facts()));
        assert!(store.get("nutrition_egg_timestamp").unwrap().is_some());
    }

    #[test]
    fn test_name_is_normalized_for_lookup() {
        let (cache, _, _) = setup();
        cache.put(&NutritionQuery::new("Egg"), &facts());
        assert_eq!(cache.get(&NutritionQuery::new("  EGG ")), Some(facts()));
    }

    #[test]
    fn test_amount_is_part_of_the_key() {
        let (cache, _, _) = setup();
        cache.put(&NutritionQuery::new("Milk").with_amount("250", "ml"), &facts());

        assert_eq!(cache.get(&NutritionQuery::new("Milk")), None);
        assert!(
            cache
                .get(&NutritionQuery::new("milk").with_amount("250", "ml"))
                .is_some()
        );
    }

    #[test]
    fn test_expires_after_a_day() {
        let (cache, _, clock) = setup();
        let query = NutritionQuery::new("Egg");
        cache.put(&query, &facts());

        clock.advance(TimeDelta::hours(23));
        assert!(cache.get(&query).is_some());
        clock.advance(TimeDelta::hours(1));
        assert_eq!(cache.get(&query), None);
    }

    #[test]
    fn test_missing_or_garbled_timestamp_is_a_miss() {
        let (cache, store, _) = setup();
        store.set("nutrition_egg", "{\"calories\": 155}").unwrap();
        assert_eq!(cache.get(&NutritionQuery::new("egg")), None);

        store.set("nutrition_egg_timestamp", "yesterday").unwrap();
        assert_eq!(cache.get(&NutritionQuery::new("egg")), None);
    }
}
