use healthyday_core::{
    application::HealthyDayService,
    domain::recipe::{entities::MealType, ports::RecipeService},
};

use crate::application::{commands::recipes, errors::CliError, render};

pub async fn list(service: &HealthyDayService) -> Result<(), CliError> {
    let saved = service.saved_recipes().await?;
    print!("{}", render::saved(&saved));
    Ok(())
}

pub async fn add(service: &HealthyDayService, meal: MealType, index: usize) -> Result<(), CliError> {
    let recipe = recipes::pick(service, meal, index).await?;
    let saved = service.save_recipe(recipe, meal).await?;
    println!("Saved {} ({}).", saved.recipe.name, saved.id);
    Ok(())
}

pub async fn remove(service: &HealthyDayService, id: String) -> Result<(), CliError> {
    service.delete_saved_recipe(id).await?;
    println!("Removed from saved recipes.");
    Ok(())
}
