use healthyday_core::{application::HealthyDayService, domain::common::SearchConfig};
use tracing::warn;

use crate::args::{CaloriesCommand, Command, FridgeCommand, PrefsCommand, SavedCommand};

use super::{
    commands::{auth, calories, fridge, preferences, recipes, saved},
    errors::CliError,
};

/// Where the user goes after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Done,
    /// The session is gone; the user has to log in again.
    Login { reason: String },
}

pub struct Controller {
    service: HealthyDayService,
    search: SearchConfig,
}

impl Controller {
    pub fn new(service: HealthyDayService, search: SearchConfig) -> Self {
        Self { service, search }
    }

    pub async fn run(&self, command: Command) -> Result<Navigation, CliError> {
        route(self.dispatch(command).await)
    }

    async fn dispatch(&self, command: Command) -> Result<(), CliError> {
        let service = &self.service;
        match command {
            Command::Login(args) => auth::login(service, args).await,
            Command::Register(args) => auth::register(service, args).await,
            Command::Logout => auth::logout(service),
            Command::Whoami => auth::whoami(service),
            Command::Fridge { action } => match action {
                FridgeCommand::List => fridge::list(service).await,
                FridgeCommand::Add(args) => fridge::add(service, args).await,
                FridgeCommand::Edit { id, fields } => fridge::edit(service, id, fields).await,
                FridgeCommand::Remove { id } => fridge::remove(service, id).await,
                FridgeCommand::Search => fridge::search(service, self.search.clone()).await,
                FridgeCommand::Parse { text, add } => fridge::parse(service, text, add).await,
                FridgeCommand::Nutrition {
                    name,
                    quantity,
                    unit,
                } => fridge::nutrition(service, name, quantity, unit).await,
            },
            Command::Prefs { action } => match action {
                PrefsCommand::Show => preferences::show(service).await,
                PrefsCommand::Set {
                    diet,
                    spice,
                    allergies,
                    goals,
                } => preferences::set(service, diet, spice, allergies, goals).await,
            },
            Command::Recipes { meal, refresh } => recipes::show(service, meal, refresh).await,
            Command::Cook {
                meal,
                index,
                adjustments,
                yes,
            } => recipes::cook(service, meal, index, adjustments, yes).await,
            Command::Saved { action } => match action {
                SavedCommand::List => saved::list(service).await,
                SavedCommand::Add { meal, index } => saved::add(service, meal, index).await,
                SavedCommand::Remove { id } => saved::remove(service, id).await,
            },
            Command::Calories { action } => match action {
                CaloriesCommand::Log {
                    calories: amount,
                    date,
                    meal,
                    note,
                } => calories::log(service, amount, date, meal, note).await,
                CaloriesCommand::Summary { start, end } => {
                    calories::summary(service, start, end).await
                }
            },
        }
    }
}

/// Session loss becomes a navigation to the login boundary; everything else is
/// reported as an error.
pub fn route(result: Result<(), CliError>) -> Result<Navigation, CliError> {
    match result {
        Ok(()) => Ok(Navigation::Done),
        Err(e) if e.requires_login() => {
            warn!("Redirecting to login: {}", e);
            Ok(Navigation::Login {
                reason: e.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}
