use std::fmt::Write;

use chrono::NaiveDate;
use healthyday_core::domain::{
    calories::entities::CalorieSummary,
    ingredient::entities::{Ingredient, IngredientSuggestion, NutritionFacts, NutritionLookup},
    preferences::entities::Preferences,
    reconciliation::{entities::DeductionPlan, flow::CookSummary},
    recipe::{
        entities::{RecipeIngredient, SavedRecipe},
        value_objects::RecipeBatch,
    },
    search::SearchEvent,
};

fn amount(quantity: &str, unit: &str) -> String {
    match (quantity.trim(), unit.trim()) {
        ("", "") => String::new(),
        (q, "") => q.to_string(),
        ("", u) => u.to_string(),
        (q, u) => format!("{} {}", q, u),
    }
}

fn nutrition_line(facts: &NutritionFacts) -> String {
    format!(
        "{:.0} kcal, protein {:.1}g, carbs {:.1}g, fat {:.1}g",
        facts.calories, facts.protein, facts.carbs, facts.fat
    )
}

pub fn fridge(items: &[Ingredient], today: NaiveDate) -> String {
    if items.is_empty() {
        return "Your fridge is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = write!(
            out,
            "{}  {} ({})",
            item.id,
            item.name,
            amount(&item.quantity, &item.unit)
        );
        if let Some(expiry) = item.expiry_date {
            let marker = if item.is_expired(today) { " EXPIRED" } else { "" };
            let _ = write!(out, "  expires {}{}", expiry, marker);
        }
        out.push('\n');
    }
    out
}

pub fn suggestions(items: &[IngredientSuggestion]) -> String {
    if items.is_empty() {
        return "No matching ingredients.\n".to_string();
    }

    let mut out = String::new();
    for s in items {
        let tag = if s.is_custom {
            " [custom]".to_string()
        } else {
            s.category
                .as_deref()
                .map(|c| format!(" [{}]", c))
                .unwrap_or_default()
        };
        let _ = writeln!(
            out,
            "{}{}  per 100{}: {}",
            s.name,
            tag,
            if s.unit.is_empty() { "g" } else { &s.unit },
            nutrition_line(&s.nutrition)
        );
    }
    out
}

pub fn nutrition(name: &str, lookup: &NutritionLookup) -> String {
    match lookup {
        NutritionLookup::Found(facts) => format!("{}: {}\n", name, nutrition_line(facts)),
        NutritionLookup::RateLimited { message } => format!("Warning: {}\n", message),
    }
}

pub fn search_event(event: &SearchEvent) -> String {
    match event {
        SearchEvent::Suggestions { suggestions: s, .. } => suggestions(s),
        SearchEvent::Nutrition { query, lookup } => {
            format!("Not in the catalogue. {}", nutrition(query, lookup))
        }
        SearchEvent::Failed { query, error } => {
            format!("Search for '{}' failed: {}\n", query, error)
        }
    }
}

fn ingredient_list(out: &mut String, title: &str, items: &[RecipeIngredient]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "   {}:", title);
    for item in items {
        let _ = writeln!(out, "     - {} {}", item.name, amount(&item.quantity, &item.unit));
    }
}

pub fn recipes(batch: &RecipeBatch) -> String {
    let mut out = String::new();
    let source = if batch.from_cache { " (cached)" } else { "" };
    let _ = writeln!(out, "{} suggestions{}:", batch.meal_type, source);
    if batch.recipes.is_empty() {
        out.push_str("No recipes could be generated. Try adding ingredients to your fridge.\n");
        return out;
    }

    for (position, recipe) in batch.recipes.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", position + 1, recipe.name);
        if !recipe.description.is_empty() {
            let _ = writeln!(out, "   {}", recipe.description);
        }
        let mut meta = Vec::new();
        if let Some(time) = &recipe.cooking_time {
            meta.push(time.clone());
        }
        if let Some(difficulty) = &recipe.difficulty {
            meta.push(difficulty.clone());
        }
        meta.extend(recipe.tags.iter().cloned());
        if !meta.is_empty() {
            let _ = writeln!(out, "   {}", meta.join(" | "));
        }
        let _ = writeln!(out, "   {}", nutrition_line(&recipe.nutrition));
        ingredient_list(&mut out, "From your fridge", &recipe.available_ingredients);
        ingredient_list(&mut out, "To buy", &recipe.missing_ingredients);
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            let _ = writeln!(out, "   {}) {}", step + 1, instruction);
        }
    }
    out
}

pub fn plan(recipe_name: &str, plan: &DeductionPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cooking {} will use:", recipe_name);
    if plan.is_empty() {
        out.push_str("  nothing from your fridge\n");
        return out;
    }

    for (position, entry) in plan.entries().iter().enumerate() {
        let _ = write!(
            out,
            "  {}. {} -> {} (have {})",
            position + 1,
            amount(&entry.deduct_quantity, &entry.deduct_unit),
            entry.matched.name,
            amount(&entry.matched.quantity, &entry.matched.unit)
        );
        if entry.unit_mismatch() {
            out.push_str("  [unit differs]");
        }
        if entry.exceeds_stock() {
            out.push_str("  [more than in stock]");
        }
        out.push('\n');
    }
    out
}

pub fn cook_summary(summary: &CookSummary) -> String {
    let mut out = format!("Enjoy your {}!\n", summary.recipe_name);
    for entry in &summary.deductions {
        let _ = writeln!(
            out,
            "  used {} of {}",
            amount(&entry.deduct_quantity, &entry.deduct_unit),
            entry.matched.name
        );
    }
    out.push_str("Fridge quantities were not changed; edit them with `healthyday fridge edit`.\n");
    out
}

pub fn saved(recipes: &[SavedRecipe]) -> String {
    if recipes.is_empty() {
        return "No saved recipes yet.\n".to_string();
    }

    let mut out = String::new();
    for saved in recipes {
        let _ = write!(out, "{}  {} [{}]", saved.id, saved.recipe.name, saved.meal_type);
        if let Some(at) = saved.saved_at {
            let _ = write!(out, "  saved {}", at.format("%Y-%m-%d"));
        }
        out.push('\n');
    }
    out
}

pub fn preferences(prefs: &Preferences) -> String {
    let list = |items: &[String]| {
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    };
    format!(
        "Diet: {}\nSpice level: {}\nAllergies: {}\nGoals: {}\n",
        prefs.diet_type,
        prefs.spice_level,
        list(&prefs.allergies),
        list(&prefs.goals)
    )
}

pub fn calorie_summary(summary: &CalorieSummary) -> String {
    let mut out = format!(
        "{} to {}: {:.0} kcal total, {:.0} kcal/day\n",
        summary.start_date,
        summary.end_date,
        summary.total_calories,
        summary.daily_average()
    );
    for day in &summary.daily_totals {
        let _ = writeln!(out, "  {}  {:.0}", day.date, day.calories);
    }
    out
}

#[cfg(test)]
mod tests {
    use healthyday_core::domain::{
        reconciliation::build_deduction_plan,
        recipe::entities::{MealType, RecipeSuggestion},
    };

    use super::*;

    fn egg(quantity: &str, unit: &str) -> Ingredient {
        Ingredient {
            id: "i1".to_string(),
            name: "Egg".to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            nutrition: None,
        }
    }

    #[test]
    fn test_fridge_marks_expired() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(
            fridge(&[egg("6", "pcs")], today),
            "i1  Egg (6 pcs)  expires 2025-06-01 EXPIRED\n"
        );
        assert_eq!(fridge(&[], today), "Your fridge is empty.\n");
    }

    #[test]
    fn test_plan_shows_warnings() {
        let recipe = RecipeSuggestion {
            name: "Shakshuka".to_string(),
            available_ingredients: vec![RecipeIngredient::new("Eggs", "8", "")],
            ..Default::default()
        };
        let plan = build_deduction_plan(&recipe, &[egg("6", "pcs")]);
        assert_eq!(
            super::plan(&recipe.name, &plan),
            "Cooking Shakshuka will use:\n  1. 8 -> Egg (have 6 pcs)  [more than in stock]\n"
        );
    }

    #[test]
    fn test_cached_batch_is_labelled() {
        let batch = RecipeBatch {
            meal_type: MealType::Lunch,
            recipes: Vec::new(),
            from_cache: true,
        };
        assert!(recipes(&batch).starts_with("Lunch suggestions (cached):\n"));
    }

    #[test]
    fn test_rate_limit_is_a_warning() {
        let lookup = NutritionLookup::RateLimited {
            message: "API rate limit reached. Please try again later.".to_string(),
        };
        assert_eq!(
            nutrition("Kale", &lookup),
            "Warning: API rate limit reached. Please try again later.\n"
        );
    }
}
