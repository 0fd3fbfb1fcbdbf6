use chrono::{Local, NaiveDate};
use healthyday_core::{
    application::HealthyDayService,
    domain::{
        calories::{
            ports::CalorieService,
            value_objects::{CalorieLogInput, SummaryRange},
        },
        recipe::entities::MealType,
    },
};

use crate::application::{
    errors::CliError,
    render,
    validators::{CalorieLogValidator, validate_form},
};

pub async fn log(
    service: &HealthyDayService,
    calories: f64,
    date: Option<NaiveDate>,
    meal: Option<MealType>,
    note: Option<String>,
) -> Result<(), CliError> {
    validate_form(&CalorieLogValidator {
        calories,
        note: note.clone(),
    })?;

    let entry = service
        .log_calories(CalorieLogInput {
            calories,
            date,
            meal_type: meal.map(|m| m.to_string()),
            note,
        })
        .await?;
    println!("Logged {:.0} kcal on {}.", entry.calories, entry.date);
    Ok(())
}

pub async fn summary(
    service: &HealthyDayService,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), CliError> {
    let range = match (start, end) {
        (None, None) => SummaryRange::last_week_ending(Local::now().date_naive()),
        (start, end) => SummaryRange { start, end },
    };
    let summary = service.calorie_summary(range).await?;
    print!("{}", render::calorie_summary(&summary));
    Ok(())
}
