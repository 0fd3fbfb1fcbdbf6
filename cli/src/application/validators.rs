use validator::{Validate, ValidationErrors};

use super::errors::CliError;

#[derive(Debug, Validate)]
pub struct CredentialsValidator {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Validate)]
pub struct IngredientValidator {
    #[validate(length(min = 1, max = 100, message = "name is required (at most 100 characters)"))]
    pub name: String,

    #[validate(length(min = 1, message = "quantity is required"))]
    pub quantity: String,

    #[validate(range(min = 0.0, message = "calories cannot be negative"))]
    pub calories: Option<f64>,

    #[validate(range(min = 0.0, message = "protein cannot be negative"))]
    pub protein: Option<f64>,

    #[validate(range(min = 0.0, message = "carbs cannot be negative"))]
    pub carbs: Option<f64>,

    #[validate(range(min = 0.0, message = "fat cannot be negative"))]
    pub fat: Option<f64>,
}

#[derive(Debug, Validate)]
pub struct CalorieLogValidator {
    #[validate(range(
        exclusive_min = 0.0,
        max = 20000.0,
        message = "calories must be between 0 and 20000"
    ))]
    pub calories: f64,

    #[validate(length(max = 200, message = "note is limited to 200 characters"))]
    pub note: Option<String>,
}

/// Runs the form's rules and folds every failure into one message.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), CliError> {
    form.validate()
        .map_err(|errors| CliError::Invalid(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
