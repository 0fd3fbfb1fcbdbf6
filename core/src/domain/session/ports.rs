use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::{
    entities::User,
    value_objects::{Credentials, LoginResponse},
};

/// Unauthenticated account endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait AuthGateway: Send + Sync {
    fn login(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<LoginResponse, CoreError>> + Send;

    fn register(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Account flows. Login persists the session through the session manager; logout
/// drops it locally.
pub trait AuthService: Send + Sync {
    fn login(&self, credentials: Credentials) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn register(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn logout(&self) -> Result<(), CoreError>;

    fn current_user(&self) -> Option<User>;
}
