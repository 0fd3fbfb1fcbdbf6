use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{entities::app_errors::CoreError, lenient, normalize_name};

use super::entities::NutritionFacts;

/// Payload for a new fridge ingredient. Also what free-text parsing yields, so a
/// parsed list can be added as is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(
        rename = "expiryDate",
        default,
        deserialize_with = "lenient::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
}

impl IngredientInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Invalid ingredient: name required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update of a fridge ingredient; absent fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IngredientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "expiryDate", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

impl IngredientPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Ingredient name cannot be blank".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(CoreError::Validation("Nothing to update".to_string()));
        }
        Ok(())
    }
}

/// A nutrition lookup request. Quantity and unit are optional refinements and take
/// part in the cache key only when both are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutritionQuery {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl NutritionQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_amount(mut self, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into()).filter(|q: &String| !q.trim().is_empty());
        self.unit = Some(unit.into()).filter(|u: &String| !u.trim().is_empty());
        self
    }

    /// `nutrition_<name>` or `nutrition_<name>_<qty>_<unit>`.
    pub fn cache_key(&self) -> String {
        let name = normalize_name(&self.name);
        match (&self.quantity, &self.unit) {
            (Some(quantity), Some(unit)) => {
                format!("nutrition_{}_{}_{}", name, quantity.trim(), unit.trim())
            }
            _ => format!("nutrition_{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_normalizes_name() {
        assert_eq!(
            NutritionQuery::new("  Chicken Breast ").cache_key(),
            "nutrition_chicken breast"
        );
    }

    #[test]
    fn test_cache_key_includes_amount_only_when_complete() {
        let query = NutritionQuery::new("Milk").with_amount("250", "ml");
        assert_eq!(query.cache_key(), "nutrition_milk_250_ml");

        let query = NutritionQuery::new("Milk").with_amount("250", "");
        assert_eq!(query.cache_key(), "nutrition_milk");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input = IngredientInput {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_parsed_ingredient_deserializes_into_input() {
        let raw = r#"{"name": "Egg", "quantity": 2, "unit": "pcs", "calories": 155,
                      "protein": 13, "carbs": 1.1, "fat": 11, "expiryDate": "2025-12-25"}"#;
        let input: IngredientInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.quantity, "2");
        assert_eq!(input.nutrition.protein, 13.0);
        assert_eq!(input.expiry_date, NaiveDate::from_ymd_opt(2025, 12, 25));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = IngredientPatch {
            quantity: Some("4".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"quantity": "4"})
        );
    }
}
