/// Recommendation service boundary
///
/// The catalog, the user's stored preferences and the ranked recommendation
/// lists all come from an external recommendation service. This module defines
/// what the session needs from it; `http` talks to the real service.
use crate::{
    error::AppResult,
    models::{ApiUserPreferences, CatalogItem, MovieId, RecommendationMode},
    session::SessionContext,
};

pub mod http;

pub use http::HttpRecommender;

/// Trait for recommendation service clients
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommenderClient: Send + Sync {
    /// Fetch the full catalog in service order
    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>>;

    /// Fetch the preferences the service has on record for a user
    async fn fetch_preferences(&self, user_id: &str) -> AppResult<ApiUserPreferences>;

    /// Record a like (`liked = true`) or dislike for a user
    async fn submit_preference(&self, user_id: &str, movie_id: MovieId, liked: bool)
        -> AppResult<()>;

    /// Fetch a ranked recommendation list for the context's user and mode
    ///
    /// Order and membership of the result are authoritative.
    async fn fetch_recommendations(
        &self,
        context: &SessionContext,
        limit: usize,
    ) -> AppResult<Vec<CatalogItem>>;

    /// Set the service-wide recommendation mode, returning the mode now active
    async fn set_mode(&self, mode: RecommendationMode) -> AppResult<RecommendationMode>;

    /// Read the service-wide recommendation mode
    async fn get_mode(&self) -> AppResult<RecommendationMode>;

    /// Client name for logging and debugging
    fn name(&self) -> &'static str;
}
