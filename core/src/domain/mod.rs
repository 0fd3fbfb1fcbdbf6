pub mod cache;
pub mod calories;
pub mod common;
pub mod ingredient;
pub mod preferences;
pub mod recipe;
pub mod reconciliation;
pub mod search;
pub mod session;
