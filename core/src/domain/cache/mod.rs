pub mod entities;
pub mod nutrition_cache;
pub mod recipe_cache;

pub use entities::*;
pub use nutrition_cache::NutritionCache;
pub use recipe_cache::RecipeCache;

use std::time::Duration;

/// An entry written at `stored_at` is fresh strictly before `stored_at + ttl`.
pub(crate) fn is_fresh(stored_at_ms: i64, now_ms: i64, ttl: Duration) -> bool {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now_ms.saturating_sub(stored_at_ms) < ttl_ms
}
