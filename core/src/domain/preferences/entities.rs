use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

pub const DIET_TYPES: [&str; 6] = [
    "No Restriction",
    "Vegan",
    "Vegetarian",
    "Keto",
    "Paleo",
    "Gluten-Free",
];
pub const SPICE_LEVELS: [&str; 4] = ["Mild", "Medium", "Spicy", "Very Spicy"];
pub const ALLERGIES: [&str; 7] = [
    "Peanuts",
    "Tree Nuts",
    "Dairy",
    "Eggs",
    "Soy",
    "Shellfish",
    "Fish",
];
pub const GOALS: [&str; 5] = [
    "Weight Loss",
    "Muscle Gain",
    "Maintain Weight",
    "Eat More Veggies",
    "Low Carb",
];

/// Dietary profile fed to the recommender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "dietType", default = "default_diet_type")]
    pub diet_type: String,
    #[serde(rename = "spiceLevel", default = "default_spice_level")]
    pub spice_level: String,
    #[serde(default, deserialize_with = "list_or_null")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub goals: Vec<String>,
}

fn default_diet_type() -> String {
    DIET_TYPES[0].to_string()
}

fn default_spice_level() -> String {
    SPICE_LEVELS[1].to_string()
}

fn list_or_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            diet_type: default_diet_type(),
            spice_level: default_spice_level(),
            allergies: Vec::new(),
            goals: Vec::new(),
        }
    }
}

/// Case-insensitive lookup of `value` among `options`, returning the canonical spelling.
pub fn canonical_option(options: &[&str], value: &str) -> Option<String> {
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(value.trim()))
        .map(|o| o.to_string())
}

impl Preferences {
    /// Adds `value` to the list when absent, removes it when present.
    pub fn toggle_allergy(&mut self, value: &str) {
        toggle(&mut self.allergies, value);
    }

    pub fn toggle_goal(&mut self, value: &str) {
        toggle(&mut self.goals, value);
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let check = |options: &[&str], value: &str, field: &str| {
            if options.contains(&value) {
                Ok(())
            } else {
                Err(CoreError::Validation(format!(
                    "Unknown {} '{}', expected one of: {}",
                    field,
                    value,
                    options.join(", ")
                )))
            }
        };

        check(&DIET_TYPES, &self.diet_type, "diet type")?;
        check(&SPICE_LEVELS, &self.spice_level, "spice level")?;
        for allergy in &self.allergies {
            check(&ALLERGIES, allergy, "allergy")?;
        }
        for goal in &self.goals {
            check(&GOALS, goal, "goal")?;
        }
        Ok(())
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_lists_default_to_empty() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"dietType": "Vegan", "allergies": null}"#).unwrap();
        assert_eq!(prefs.diet_type, "Vegan");
        assert_eq!(prefs.spice_level, "Medium");
        assert!(prefs.allergies.is_empty());
        assert!(prefs.goals.is_empty());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut prefs = Preferences::default();
        prefs.toggle_allergy("Dairy");
        prefs.toggle_goal("Low Carb");
        assert_eq!(prefs.allergies, vec!["Dairy".to_string()]);

        prefs.toggle_allergy("Dairy");
        assert!(prefs.allergies.is_empty());
        assert_eq!(prefs.goals, vec!["Low Carb".to_string()]);
    }

    #[test]
    fn test_validate_rejects_unknown_options() {
        let mut prefs = Preferences::default();
        assert!(prefs.validate().is_ok());

        prefs.spice_level = "Volcanic".to_string();
        assert!(matches!(prefs.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_canonical_option_is_case_insensitive() {
        assert_eq!(
            canonical_option(&DIET_TYPES, "gluten-free").as_deref(),
            Some("Gluten-Free")
        );
        assert_eq!(canonical_option(&GOALS, "bulk"), None);
    }
}
