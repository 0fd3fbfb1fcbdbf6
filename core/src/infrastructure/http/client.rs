use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, instrument, warn};

use crate::domain::{
    calories::{
        entities::{CalorieLog, CalorieSummary},
        ports::CalorieLogRepository,
        value_objects::{CalorieLogInput, SummaryRange},
    },
    common::{ApiConfig, entities::app_errors::CoreError},
    ingredient::{
        entities::{Ingredient, IngredientSuggestion, NutritionFacts, NutritionLookup},
        ports::IngredientRepository,
        value_objects::{IngredientInput, IngredientPatch, NutritionQuery},
    },
    preferences::{entities::Preferences, ports::PreferenceRepository},
    recipe::{
        entities::{MealType, RecipeSuggestion, SavedRecipe},
        ports::{RecipeGenerator, SavedRecipeRepository},
        value_objects::SaveRecipeInput,
    },
    session::{
        manager::SessionManager,
        ports::AuthGateway,
        value_objects::{Credentials, LoginResponse},
    },
};

use super::{
    errors::error_for_status,
    wire::{
        ErrorBody, GenerateRecipesRequest, GenerateRecipesResponse, ParseIngredientsRequest,
        ParseIngredientsResponse, RATE_LIMIT_MESSAGE,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
}

/// Client for the HealthyDay JSON API. Authenticated calls read the bearer token
/// from the shared session; a 401 on such a call tears the session down and
/// surfaces as `CoreError::SessionExpired` for the caller to route to login.
#[derive(Clone)]
pub struct HttpApiClient {
    base_url: String,
    client: Client,
    session: Arc<SessionManager>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        access: Access,
    ) -> Result<RequestBuilder, CoreError> {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match access {
            Access::Public => Ok(builder),
            Access::Authenticated => {
                let token = self.session.token().ok_or(CoreError::NotAuthenticated)?;
                Ok(builder.bearer_auth(token))
            }
        }
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        fallback: &'static str,
    ) -> Result<Response, CoreError> {
        builder.send().await.map_err(|e| {
            error!("API request failed: {}", e);
            if e.is_timeout() {
                CoreError::Network(format!("{}: request timed out", fallback))
            } else {
                CoreError::Network(format!("{}: {}", fallback, e))
            }
        })
    }

    async fn check(
        &self,
        response: Response,
        access: Access,
        fallback: &'static str,
    ) -> Result<Response, CoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && access == Access::Authenticated {
            self.session.expire();
            return Err(CoreError::SessionExpired);
        }

        let body = response.text().await.unwrap_or_default();
        error!("API error: {} - {}", status, body);
        Err(error_for_status(status, &body, fallback))
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        access: Access,
        fallback: &'static str,
    ) -> Result<Response, CoreError> {
        let response = self.dispatch(builder, fallback).await?;
        self.check(response, access, fallback).await
    }

    async fn decode<T>(response: Response, fallback: &'static str) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Send,
    {
        response.json::<T>().await.map_err(|e| {
            error!("Failed to decode API response: {}", e);
            CoreError::Decode(format!("{}: {}", fallback, e))
        })
    }

    async fn get_json<T>(&self, path: &str, fallback: &'static str) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Send,
    {
        let builder = self.request(Method::GET, path, Access::Authenticated)?;
        let response = self.execute(builder, Access::Authenticated, fallback).await?;
        Self::decode(response, fallback).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        access: Access,
        fallback: &'static str,
    ) -> Result<T, CoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let builder = self.request(method, path, access)?.json(body);
        let response = self.execute(builder, access, fallback).await?;
        Self::decode(response, fallback).await
    }

    async fn delete(&self, path: &str, fallback: &'static str) -> Result<(), CoreError> {
        let builder = self.request(Method::DELETE, path, Access::Authenticated)?;
        self.execute(builder, Access::Authenticated, fallback)
            .await
            .map(|_| ())
    }
}

impl AuthGateway for HttpApiClient {
    #[instrument(skip(self), fields(username = %credentials.username))]
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse, CoreError> {
        self.send_json(
            Method::POST,
            "/login",
            &credentials,
            Access::Public,
            "Login failed",
        )
        .await
    }

    #[instrument(skip(self), fields(username = %credentials.username))]
    async fn register(&self, credentials: Credentials) -> Result<(), CoreError> {
        let builder = self
            .request(Method::POST, "/register", Access::Public)?
            .json(&credentials);
        self.execute(builder, Access::Public, "Registration failed")
            .await
            .map(|_| ())
    }
}

impl IngredientRepository for HttpApiClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>, CoreError> {
        self.get_json("/ingredients", "Failed to fetch fridge items")
            .await
    }

    async fn create_ingredient(&self, input: IngredientInput) -> Result<Ingredient, CoreError> {
        self.send_json(
            Method::POST,
            "/ingredients",
            &input,
            Access::Authenticated,
            "Failed to add ingredient",
        )
        .await
    }

    async fn update_ingredient(
        &self,
        ingredient_id: String,
        patch: IngredientPatch,
    ) -> Result<Ingredient, CoreError> {
        self.send_json(
            Method::PUT,
            &format!("/ingredients/{}", ingredient_id),
            &patch,
            Access::Authenticated,
            "Failed to update ingredient",
        )
        .await
    }

    async fn delete_ingredient(&self, ingredient_id: String) -> Result<(), CoreError> {
        self.delete(
            &format!("/ingredients/{}", ingredient_id),
            "Failed to delete ingredient",
        )
        .await
    }

    #[instrument(skip(self), level = "debug")]
    async fn search_common(&self, query: String) -> Result<Vec<IngredientSuggestion>, CoreError> {
        let fallback = "Failed to search ingredients";
        let builder = self
            .request(
                Method::GET,
                "/common-ingredients/search",
                Access::Authenticated,
            )?
            .query(&[("q", query.as_str())]);
        let response = self
            .execute(builder, Access::Authenticated, fallback)
            .await?;
        Self::decode(response, fallback).await
    }

    async fn parse_text(&self, text: String) -> Result<Vec<IngredientInput>, CoreError> {
        let parsed: ParseIngredientsResponse = self
            .send_json(
                Method::POST,
                "/ingredients/parse",
                &ParseIngredientsRequest { text },
                Access::Authenticated,
                "Failed to parse ingredients",
            )
            .await?;
        Ok(parsed.ingredients)
    }

    #[instrument(skip(self), fields(name = %query.name))]
    async fn fetch_nutrition(&self, query: NutritionQuery) -> Result<NutritionLookup, CoreError> {
        let fallback = "Failed to get nutrition information";
        let builder = self
            .request(Method::POST, "/ingredients/nutrition", Access::Authenticated)?
            .json(&query);
        let response = self.dispatch(builder, fallback).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let body = ErrorBody::parse(&response.text().await.unwrap_or_default());
            warn!("Nutrition lookup rate limited");
            return Ok(NutritionLookup::RateLimited {
                message: body.message.unwrap_or_else(|| RATE_LIMIT_MESSAGE.to_string()),
            });
        }

        let response = self
            .check(response, Access::Authenticated, fallback)
            .await?;
        let value: serde_json::Value = Self::decode(response, fallback).await?;

        let body: ErrorBody = serde_json::from_value(value.clone()).unwrap_or_default();
        if body.is_rate_limit() {
            warn!("Nutrition lookup rate limited");
            return Ok(NutritionLookup::RateLimited {
                message: body.message.unwrap_or_else(|| RATE_LIMIT_MESSAGE.to_string()),
            });
        }

        let facts: NutritionFacts = serde_json::from_value(value).map_err(|e| {
            error!("Invalid nutrition payload: {}", e);
            CoreError::Decode(format!("{}: {}", fallback, e))
        })?;
        debug!(calories = facts.calories, "Nutrition lookup succeeded");
        Ok(NutritionLookup::Found(facts))
    }
}

impl RecipeGenerator for HttpApiClient {
    #[instrument(skip(self))]
    async fn generate(&self, meal_type: MealType) -> Result<Vec<RecipeSuggestion>, CoreError> {
        let generated: GenerateRecipesResponse = self
            .send_json(
                Method::POST,
                "/recipes/generate",
                &GenerateRecipesRequest { meal_type },
                Access::Authenticated,
                "Failed to generate recipes",
            )
            .await?;
        Ok(generated.recipes)
    }
}

impl SavedRecipeRepository for HttpApiClient {
    async fn fetch_saved(&self) -> Result<Vec<SavedRecipe>, CoreError> {
        self.get_json("/saved-recipes", "Failed to load saved recipes")
            .await
    }

    async fn save(&self, input: SaveRecipeInput) -> Result<SavedRecipe, CoreError> {
        self.send_json(
            Method::POST,
            "/saved-recipes",
            &input,
            Access::Authenticated,
            "Failed to save recipe",
        )
        .await
    }

    async fn delete_saved(&self, recipe_id: String) -> Result<(), CoreError> {
        self.delete(
            &format!("/saved-recipes/{}", recipe_id),
            "Failed to delete recipe",
        )
        .await
    }
}

impl PreferenceRepository for HttpApiClient {
    async fn fetch_preferences(&self) -> Result<Preferences, CoreError> {
        self.get_json("/preferences", "Failed to load preferences")
            .await
    }

    async fn update_preferences(&self, preferences: Preferences) -> Result<Preferences, CoreError> {
        self.send_json(
            Method::PUT,
            "/preferences",
            &preferences,
            Access::Authenticated,
            "Failed to save preferences",
        )
        .await
    }
}

impl CalorieLogRepository for HttpApiClient {
    async fn create_log(&self, input: CalorieLogInput) -> Result<CalorieLog, CoreError> {
        self.send_json(
            Method::POST,
            "/calories",
            &input,
            Access::Authenticated,
            "Failed to log calories",
        )
        .await
    }

    async fn fetch_summary(&self, range: SummaryRange) -> Result<CalorieSummary, CoreError> {
        let fallback = "Failed to load calorie summary";
        let builder = self
            .request(Method::GET, "/calories/summary", Access::Authenticated)?
            .query(&range.query());
        let response = self
            .execute(builder, Access::Authenticated, fallback)
            .await?;
        Self::decode(response, fallback).await
    }
}
