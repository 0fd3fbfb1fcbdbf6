use healthyday_core::domain::common::entities::app_errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0}")]
    Invalid(String),

    #[error("No recipe #{index} for {meal} ({available} available)")]
    NoSuchRecipe {
        meal: String,
        index: usize,
        available: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn requires_login(&self) -> bool {
        matches!(self, CliError::Core(e) if e.requires_login())
    }
}
