use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::entities::{IngredientSuggestion, NutritionLookup},
};

/// Results published by a debounced search, tagged with the query that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Suggestions {
        query: String,
        suggestions: Vec<IngredientSuggestion>,
    },
    /// The AI lookup that follows a search with no suggestions.
    Nutrition {
        query: String,
        lookup: NutritionLookup,
    },
    Failed {
        query: String,
        error: CoreError,
    },
}

impl SearchEvent {
    pub fn query(&self) -> &str {
        match self {
            SearchEvent::Suggestions { query, .. }
            | SearchEvent::Nutrition { query, .. }
            | SearchEvent::Failed { query, .. } => query,
        }
    }
}
