use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{ingredient::entities::Ingredient, recipe::entities::RecipeSuggestion};

use super::entities::{DeductionEntry, DeductionPlan};

static LEADING_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?|\.\d+)").ok());

/// Leading numeric part of a free-form quantity ("2", "1.5 cups", "200g").
pub fn parse_quantity(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .as_ref()?
        .captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Case-insensitive containment in either direction.
pub fn names_match(inventory_name: &str, required_name: &str) -> bool {
    let stocked = inventory_name.trim().to_lowercase();
    let required = required_name.trim().to_lowercase();
    if stocked.is_empty() || required.is_empty() {
        return false;
    }
    required.contains(&stocked) || stocked.contains(&required)
}

/// Matches every available ingredient of `recipe` against `inventory`. The first
/// matching fridge row wins; requirements without a match are left out.
pub fn build_deduction_plan(recipe: &RecipeSuggestion, inventory: &[Ingredient]) -> DeductionPlan {
    let entries = recipe
        .available_ingredients
        .iter()
        .filter_map(|required| {
            let matched = inventory
                .iter()
                .find(|item| names_match(&item.name, &required.name));
            if matched.is_none() {
                debug!("No fridge match for {}", required.name);
            }
            matched.map(|item| DeductionEntry::new(required.clone(), item.clone()))
        })
        .collect();

    DeductionPlan::new(entries)
}
