use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::Preferences;

#[cfg_attr(test, mockall::automock)]
pub trait PreferenceRepository: Send + Sync {
    fn fetch_preferences(&self) -> impl Future<Output = Result<Preferences, CoreError>> + Send;

    fn update_preferences(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, CoreError>> + Send;
}

pub trait PreferenceService: Send + Sync {
    fn get_preferences(&self) -> impl Future<Output = Result<Preferences, CoreError>> + Send;

    /// Validates, saves and drops every cached recipe set generated under the old
    /// profile.
    fn save_preferences(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, CoreError>> + Send;
}
