use tracing::{info, instrument};

use crate::domain::{
    calories::ports::CalorieLogRepository,
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    ingredient::ports::IngredientRepository,
    preferences::ports::PreferenceRepository,
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::{
        entities::{Session, User},
        ports::{AuthGateway, AuthService},
        value_objects::Credentials,
    },
};

impl<A, I, RG, SR, P, CL, C> AuthService for Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    #[instrument(skip(self), fields(username = %credentials.username))]
    async fn login(&self, credentials: Credentials) -> Result<User, CoreError> {
        credentials.validate()?;

        let response = self.auth_gateway.login(credentials).await?;
        if response.token.is_empty() {
            return Err(CoreError::Decode("Login response carried no token".to_string()));
        }

        let user = response.user;
        self.session
            .begin(Session::new(response.token, Some(user.clone())))?;
        info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    #[instrument(skip(self), fields(username = %credentials.username))]
    async fn register(&self, credentials: Credentials) -> Result<(), CoreError> {
        credentials.validate()?;
        self.auth_gateway.register(credentials).await?;
        info!("Registered");
        Ok(())
    }

    fn logout(&self) -> Result<(), CoreError> {
        self.session.clear()?;
        info!("Logged out");
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.session.user()
    }
}
