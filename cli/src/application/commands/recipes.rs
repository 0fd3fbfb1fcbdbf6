use healthyday_core::{
    application::HealthyDayService,
    domain::recipe::{
        entities::{MealType, RecipeSuggestion},
        ports::RecipeService,
    },
};
use tracing::info;

use crate::application::{commands, errors::CliError, render};
use crate::args::Adjustment;

pub async fn show(
    service: &HealthyDayService,
    meal: MealType,
    refresh: bool,
) -> Result<(), CliError> {
    let batch = service.recipes_for(meal, refresh).await?;
    print!("{}", render::recipes(&batch));
    Ok(())
}

/// The `index`th (1-based) suggestion for `meal`, from the cache when fresh.
pub async fn pick(
    service: &HealthyDayService,
    meal: MealType,
    index: usize,
) -> Result<RecipeSuggestion, CliError> {
    let batch = service.recipes_for(meal, false).await?;
    let available = batch.recipes.len();
    index
        .checked_sub(1)
        .and_then(|i| batch.recipes.into_iter().nth(i))
        .ok_or(CliError::NoSuchRecipe {
            meal: meal.to_string(),
            index,
            available,
        })
}

pub async fn cook(
    service: &HealthyDayService,
    meal: MealType,
    index: usize,
    adjustments: Vec<Adjustment>,
    yes: bool,
) -> Result<(), CliError> {
    let recipe = pick(service, meal, index).await?;
    let name = recipe.name.clone();
    let mut flow = service.plan_cooking(recipe).await?;

    for adjustment in adjustments {
        flow.adjust(adjustment.index, adjustment.quantity, adjustment.unit)?;
    }

    if let Some(plan) = flow.plan() {
        print!("{}", render::plan(&name, plan));
    }

    let confirmed = yes || {
        let answer = commands::ask("Confirm these deductions? [y/N] ").await?;
        commands::is_yes(&answer)
    };
    if confirmed {
        let summary = flow.confirm()?;
        print!("{}", render::cook_summary(&summary));
    } else {
        flow.cancel()?;
        info!(recipe = %name, "Cooking cancelled");
        println!("Cancelled.");
    }
    Ok(())
}
