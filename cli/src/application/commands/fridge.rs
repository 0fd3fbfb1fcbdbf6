use std::time::Duration;

use chrono::Local;
use healthyday_core::{
    application::HealthyDayService,
    domain::{
        common::SearchConfig,
        ingredient::{
            entities::{NutritionFacts, NutritionLookup},
            ports::InventoryService,
            value_objects::{IngredientInput, IngredientPatch, NutritionQuery},
        },
        search::SearchEvent,
    },
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::timeout,
};
use tracing::warn;

use crate::application::{
    errors::CliError,
    render,
    validators::{IngredientValidator, validate_form},
};
use crate::args::{EditArgs, IngredientArgs};

pub async fn list(service: &HealthyDayService) -> Result<(), CliError> {
    let items = service.list_fridge().await?;
    print!("{}", render::fridge(&items, Local::now().date_naive()));
    Ok(())
}

pub async fn add(service: &HealthyDayService, args: IngredientArgs) -> Result<(), CliError> {
    validate_form(&IngredientValidator {
        name: args.name.trim().to_string(),
        quantity: args.quantity.trim().to_string(),
        calories: args.calories,
        protein: args.protein,
        carbs: args.carbs,
        fat: args.fat,
    })?;

    let mut nutrition = NutritionFacts {
        calories: args.calories.unwrap_or_default(),
        protein: args.protein.unwrap_or_default(),
        carbs: args.carbs.unwrap_or_default(),
        fat: args.fat.unwrap_or_default(),
    };

    if args.lookup && args.calories.is_none() {
        let query = NutritionQuery::new(args.name.trim())
            .with_amount(args.quantity.clone(), args.unit.clone());
        match service.lookup_nutrition(query).await? {
            NutritionLookup::Found(found) => nutrition = found,
            NutritionLookup::RateLimited { message } => {
                warn!("Adding without nutrition: {}", message);
                eprintln!("Warning: {}", message);
            }
        }
    }

    let added = service
        .add_to_fridge(IngredientInput {
            name: args.name.trim().to_string(),
            quantity: args.quantity.trim().to_string(),
            unit: args.unit.trim().to_string(),
            expiry_date: args.expiry,
            nutrition,
        })
        .await?;
    println!("Added {} ({}).", added.name, added.id);
    Ok(())
}

pub async fn edit(service: &HealthyDayService, id: String, args: EditArgs) -> Result<(), CliError> {
    let patch = IngredientPatch {
        name: args.name,
        quantity: args.quantity,
        unit: args.unit,
        expiry_date: args.expiry,
        calories: args.calories,
        protein: args.protein,
        carbs: args.carbs,
        fat: args.fat,
    };
    let updated = service.edit_ingredient(id, patch).await?;
    println!("Updated {}.", updated.name);
    Ok(())
}

pub async fn remove(service: &HealthyDayService, id: String) -> Result<(), CliError> {
    service.remove_ingredient(id).await?;
    println!("Removed.");
    Ok(())
}

/// Prints one search result. A failure that lost the session ends the search so the
/// controller can send the user to login.
fn show_event(event: SearchEvent) -> Result<(), CliError> {
    match event {
        SearchEvent::Failed { error, .. } if error.requires_login() => Err(error.into()),
        event => {
            print!("{}", render::search_event(&event));
            Ok(())
        }
    }
}

/// Feeds every stdin line to a debounced search and prints results as they arrive.
pub async fn search(service: &HealthyDayService, config: SearchConfig) -> Result<(), CliError> {
    let (mut search, mut events) = service.suggestion_search(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type an ingredient name, one query per line. Ctrl-D to finish.");

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => search.input(&line),
                None => break,
            },
            Some(event) = events.recv() => show_event(event)?,
        }
    }

    // Let the last query run to completion.
    while search.is_pending() {
        if let Ok(Some(event)) = timeout(Duration::from_millis(100), events.recv()).await {
            show_event(event)?;
        }
    }
    while let Ok(event) = events.try_recv() {
        show_event(event)?;
    }
    Ok(())
}

pub async fn parse(service: &HealthyDayService, text: String, add: bool) -> Result<(), CliError> {
    let parsed = service.parse_ingredients(text).await?;
    if parsed.is_empty() {
        println!("No ingredients recognised.");
        return Ok(());
    }

    for input in &parsed {
        println!("- {} {} {}", input.name, input.quantity, input.unit);
    }
    if add {
        for input in parsed {
            let added = service.add_to_fridge(input).await?;
            println!("Added {} ({}).", added.name, added.id);
        }
    }
    Ok(())
}

pub async fn nutrition(
    service: &HealthyDayService,
    name: String,
    quantity: Option<String>,
    unit: Option<String>,
) -> Result<(), CliError> {
    let mut query = NutritionQuery::new(name.trim());
    if let (Some(quantity), Some(unit)) = (quantity, unit) {
        query = query.with_amount(quantity, unit);
    }
    let lookup = service.lookup_nutrition(query).await?;
    print!("{}", render::nutrition(name.trim(), &lookup));
    Ok(())
}

#[cfg(test)]
mod tests {
    use healthyday_core::domain::common::entities::app_errors::CoreError;

    use super::*;
    use crate::application::controller::{Navigation, route};

    #[test]
    fn test_session_loss_during_search_goes_to_login() {
        let result = show_event(SearchEvent::Failed {
            query: "egg".to_string(),
            error: CoreError::SessionExpired,
        });
        assert!(matches!(route(result), Ok(Navigation::Login { .. })));

        let result = show_event(SearchEvent::Failed {
            query: "egg".to_string(),
            error: CoreError::NotAuthenticated,
        });
        assert!(result.unwrap_err().requires_login());
    }

    #[test]
    fn test_other_search_failures_keep_searching() {
        let result = show_event(SearchEvent::Failed {
            query: "egg".to_string(),
            error: CoreError::Network("connection refused".to_string()),
        });
        assert!(result.is_ok());

        let result = show_event(SearchEvent::Suggestions {
            query: "egg".to_string(),
            suggestions: Vec::new(),
        });
        assert!(result.is_ok());
    }
}
