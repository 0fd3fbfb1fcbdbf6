use healthyday_core::{
    application::HealthyDayService,
    domain::preferences::{
        entities::{ALLERGIES, DIET_TYPES, GOALS, SPICE_LEVELS, canonical_option},
        ports::PreferenceService,
    },
};

use crate::application::{errors::CliError, render};

fn option(options: &[&str], value: &str, field: &str) -> Result<String, CliError> {
    canonical_option(options, value).ok_or_else(|| {
        CliError::Invalid(format!(
            "Unknown {} '{}', expected one of: {}",
            field,
            value,
            options.join(", ")
        ))
    })
}

pub async fn show(service: &HealthyDayService) -> Result<(), CliError> {
    let prefs = service.get_preferences().await?;
    print!("{}", render::preferences(&prefs));
    Ok(())
}

pub async fn set(
    service: &HealthyDayService,
    diet: Option<String>,
    spice: Option<String>,
    allergies: Vec<String>,
    goals: Vec<String>,
) -> Result<(), CliError> {
    // Resolve every value before the round trip so a typo costs nothing.
    let diet = diet.map(|d| option(&DIET_TYPES, &d, "diet type")).transpose()?;
    let spice = spice
        .map(|s| option(&SPICE_LEVELS, &s, "spice level"))
        .transpose()?;
    let allergies = allergies
        .iter()
        .map(|a| option(&ALLERGIES, a, "allergy"))
        .collect::<Result<Vec<_>, _>>()?;
    let goals = goals
        .iter()
        .map(|g| option(&GOALS, g, "goal"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut prefs = service.get_preferences().await?;
    if let Some(diet) = diet {
        prefs.diet_type = diet;
    }
    if let Some(spice) = spice {
        prefs.spice_level = spice;
    }
    for allergy in &allergies {
        prefs.toggle_allergy(allergy);
    }
    for goal in &goals {
        prefs.toggle_goal(goal);
    }

    let saved = service.save_preferences(prefs).await?;
    print!("{}", render::preferences(&saved));
    Ok(())
}
