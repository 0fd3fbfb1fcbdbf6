use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieLogInput {
    pub calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "mealType", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CalorieLogInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.calories.is_finite() || self.calories <= 0.0 {
            return Err(CoreError::Validation(
                "Calories must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Range for the calorie summary. Absent bounds are resolved by the server: the end
/// defaults to today and the start to six days before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SummaryRange {
    pub fn last_week_ending(end: NaiveDate) -> Self {
        Self {
            start: end.checked_sub_days(Days::new(6)),
            end: Some(end),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(CoreError::Validation(
                "Start date cannot be after end date".to_string(),
            ));
        }
        Ok(())
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start {
            query.push(("start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end", end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}
