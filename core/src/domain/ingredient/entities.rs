use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::lenient;

/// Nutrition per 100g, as reported by the server or the AI lookup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fat: f64,
}

impl NutritionFacts {
    pub fn is_empty(&self) -> bool {
        self.calories == 0.0 && self.protein == 0.0 && self.carbs == 0.0 && self.fat == 0.0
    }
}

/// A row of the user's fridge inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IngredientRow")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    #[serde(rename = "expiryDate", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub nutrition: Option<NutritionFacts>,
}

/// Inventory row as the server sends it. Nutrition is present when any of the four
/// fields is; a row without them has no nutrition rather than zeros.
#[derive(Deserialize)]
struct IngredientRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    unit: String,
    #[serde(
        rename = "expiryDate",
        default,
        deserialize_with = "lenient::optional_date"
    )]
    expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    carbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    fat: Option<f64>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        let fields = [row.calories, row.protein, row.carbs, row.fat];
        let nutrition = fields.iter().any(Option::is_some).then(|| NutritionFacts {
            calories: row.calories.unwrap_or_default(),
            protein: row.protein.unwrap_or_default(),
            carbs: row.carbs.unwrap_or_default(),
            fat: row.fat.unwrap_or_default(),
        });

        Ingredient {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            expiry_date: row.expiry_date,
            nutrition,
        }
    }
}

impl Ingredient {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }
}

/// Entry returned by the common-ingredient search, either from the shared catalogue
/// or from the user's own custom ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSuggestion {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "isCustom", default)]
    pub is_custom: bool,
}

/// Outcome of an AI nutrition lookup. Rate limiting is a soft condition, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionLookup {
    Found(NutritionFacts),
    RateLimited { message: String },
}
