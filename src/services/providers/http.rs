/// HTTP client for the recommendation service
///
/// Endpoints:
/// - GET  /api/items                       catalog
/// - GET  /api/user/{user_id}/preferences  stored likes/dislikes
/// - POST /api/like, /api/dislike          record a rating
/// - POST /api/recommend                   ranked recommendations
/// - GET/POST /api/mode                    service-wide recommendation mode
use std::time::Duration;

use reqwest::{Client as HttpClient, Response, Url};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        ApiMode, ApiPreferenceUpdate, ApiRecommendationRequest, ApiRecommendationResponse,
        ApiUserPreferences, CatalogItem, MovieId, RecommendationMode,
    },
    services::providers::RecommenderClient,
    session::SessionContext,
};

const PROVIDER_NAME: &str = "recommender_http";

#[derive(Clone)]
pub struct HttpRecommender {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommender {
    /// Creates a client for the service at `api_url`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, api_url))
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// URL of a user's stored preferences, with the user id percent-encoded
    fn preferences_url(&self, user_id: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            AppError::InvalidInput(format!("Invalid recommendation service URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::InvalidInput(format!(
                    "Recommendation service URL cannot take a path: {}",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "user", user_id, "preferences"]);
        Ok(url)
    }

    /// Turns a non-2xx response into an `ExternalApi` error
    async fn check_status(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body,
            provider = PROVIDER_NAME,
            "Recommendation service request failed"
        );
        Err(AppError::ExternalApi(format!(
            "Recommendation service returned status {}: {}",
            status, body
        )))
    }
}

#[async_trait::async_trait]
impl RecommenderClient for HttpRecommender {
    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let response = self.http_client.get(self.url("/api/items")).send().await?;
        let items: Vec<CatalogItem> = Self::check_status(response).await?.json().await?;

        tracing::info!(
            items = items.len(),
            provider = PROVIDER_NAME,
            "Catalog fetched"
        );

        Ok(items)
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn fetch_preferences(&self, user_id: &str) -> AppResult<ApiUserPreferences> {
        if user_id.trim().is_empty() {
            return Err(AppError::InvalidInput("User id cannot be empty".to_string()));
        }

        let url = self.preferences_url(user_id)?;
        let response = self.http_client.get(url).send().await?;
        let preferences: ApiUserPreferences = Self::check_status(response).await?.json().await?;

        tracing::info!(
            user_id = %user_id,
            liked = preferences.liked_movies.len(),
            disliked = preferences.disliked_movies.len(),
            provider = PROVIDER_NAME,
            "Preferences fetched"
        );

        Ok(preferences)
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn submit_preference(
        &self,
        user_id: &str,
        movie_id: MovieId,
        liked: bool,
    ) -> AppResult<()> {
        let path = if liked { "/api/like" } else { "/api/dislike" };
        let body = ApiPreferenceUpdate {
            user_id: user_id.to_string(),
            movie_id,
            liked,
        };

        let response = self.http_client.post(self.url(path)).json(&body).send().await?;
        Self::check_status(response).await?;

        tracing::debug!(
            user_id = %user_id,
            movie_id = %movie_id,
            liked,
            "Preference submitted"
        );

        Ok(())
    }

    #[instrument(
        skip(self, context),
        fields(
            provider = PROVIDER_NAME,
            user_id = %context.user_id(),
            mode = %context.mode(),
        )
    )]
    async fn fetch_recommendations(
        &self,
        context: &SessionContext,
        limit: usize,
    ) -> AppResult<Vec<CatalogItem>> {
        let body = ApiRecommendationRequest {
            user_id: context.user_id().to_string(),
            mode: context.mode(),
            limit,
        };

        let response = self
            .http_client
            .post(self.url("/api/recommend"))
            .json(&body)
            .send()
            .await?;
        let result: ApiRecommendationResponse = Self::check_status(response).await?.json().await?;

        if result.mode != context.mode() {
            tracing::warn!(
                requested = %context.mode(),
                returned = %result.mode,
                "Recommendation service answered for a different mode"
            );
        }

        tracing::info!(
            user_id = %context.user_id(),
            mode = %context.mode(),
            results = result.recommendations.len(),
            provider = PROVIDER_NAME,
            "Recommendations fetched"
        );

        Ok(result.recommendations)
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn set_mode(&self, mode: RecommendationMode) -> AppResult<RecommendationMode> {
        let response = self
            .http_client
            .post(self.url("/api/mode"))
            .json(&ApiMode { mode })
            .send()
            .await?;
        let confirmed: ApiMode = Self::check_status(response).await?.json().await?;

        tracing::info!(mode = %confirmed.mode, "Recommendation mode set");

        Ok(confirmed.mode)
    }

    #[instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn get_mode(&self) -> AppResult<RecommendationMode> {
        let response = self.http_client.get(self.url("/api/mode")).send().await?;
        let current: ApiMode = Self::check_status(response).await?.json().await?;
        Ok(current.mode)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
