use serde::{Deserialize, Serialize};

use crate::domain::recipe::entities::RecipeSuggestion;

/// Stored form of `recipes_<mealType>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub recipes: Vec<RecipeSuggestion>,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
}
