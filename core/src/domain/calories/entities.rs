use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieLog {
    #[serde(default)]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(deserialize_with = "lenient::number")]
    pub calories: f64,
    #[serde(rename = "mealType", default, deserialize_with = "lenient::string")]
    pub meal_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieSummary {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "totalCalories")]
    pub total_calories: f64,
    #[serde(rename = "dailyTotals", default)]
    pub daily_totals: Vec<DailyTotal>,
    #[serde(default)]
    pub entries: Vec<CalorieLog>,
}

impl CalorieSummary {
    /// Mean over the days of the range, including days with nothing logged.
    pub fn daily_average(&self) -> f64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        if days <= 0 {
            return 0.0;
        }
        self.total_calories / days as f64
    }
}
