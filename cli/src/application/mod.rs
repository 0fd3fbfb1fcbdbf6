pub mod commands;
pub mod controller;
pub mod errors;
pub mod render;
pub mod validators;
