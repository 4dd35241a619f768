use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod analytics;
pub mod filter;
pub mod preferences;
pub mod view;

pub use analytics::{AnalyticsSnapshot, FrequencyTable};
pub use filter::{FilterCriteria, FilterOptions, FilterQuery, SortKey};
pub use preferences::{PreferenceSet, PreferenceStatus};
pub use view::ViewState;

/// Identifier of a catalog item as assigned by the recommendation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id)
    }
}

/// A single movie in the catalog
///
/// Immutable once loaded; the catalog store hands out shared references only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub director: String,
    #[serde(default)]
    pub description: String,
    /// Rating on a 0-10 scale
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_id: Option<String>,
}

/// Recommendation strategy used by the recommendation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    #[default]
    ContentBased,
    Collaborative,
}

impl RecommendationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::ContentBased => "content_based",
            RecommendationMode::Collaborative => "collaborative",
        }
    }

    /// Human readable label, matching what the client shows next to the mode switch
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationMode::ContentBased => "Content-Based Filtering",
            RecommendationMode::Collaborative => "Collaborative Filtering",
        }
    }
}

impl Display for RecommendationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Recommendation Service API Types
// ============================================================================

/// Response from GET /api/user/{user_id}/preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiUserPreferences {
    pub user_id: String,
    #[serde(default)]
    pub liked_movies: Vec<MovieId>,
    #[serde(default)]
    pub disliked_movies: Vec<MovieId>,
}

impl From<ApiUserPreferences> for PreferenceSet {
    fn from(prefs: ApiUserPreferences) -> Self {
        PreferenceSet::from_lists(prefs.liked_movies, prefs.disliked_movies)
    }
}

/// Body of POST /api/like and POST /api/dislike
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiPreferenceUpdate {
    pub user_id: String,
    pub movie_id: MovieId,
    pub liked: bool,
}

/// Body of POST /api/recommend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiRecommendationRequest {
    pub user_id: String,
    pub mode: RecommendationMode,
    pub limit: usize,
}

/// Response from POST /api/recommend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRecommendationResponse {
    pub recommendations: Vec<CatalogItem>,
    pub mode: RecommendationMode,
    pub user_id: String,
}

/// Body of POST /api/mode and response of GET /api/mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ApiMode {
    pub mode: RecommendationMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(42)), "42");
    }

    #[test]
    fn test_movie_id_serde_is_transparent() {
        let json = serde_json::to_string(&MovieId(7)).unwrap();
        assert_eq!(json, "7");

        let id: MovieId = serde_json::from_str("7").unwrap();
        assert_eq!(id, MovieId(7));
    }

    #[test]
    fn test_recommendation_mode_serialization() {
        let json = serde_json::to_string(&RecommendationMode::ContentBased).unwrap();
        assert_eq!(json, "\"content_based\"");

        let mode: RecommendationMode = serde_json::from_str("\"collaborative\"").unwrap();
        assert_eq!(mode, RecommendationMode::Collaborative);
    }

    #[test]
    fn test_recommendation_mode_rejects_unknown_value() {
        let result = serde_json::from_str::<RecommendationMode>("\"hybrid\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_item_deserialization() {
        let json = r#"{
            "id": 1,
            "title": "The Shawshank Redemption",
            "genre": "Drama",
            "year": 1994,
            "director": "Frank Darabont",
            "description": "Two imprisoned men bond over a number of years.",
            "rating": 9.3,
            "poster_url": null
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, MovieId(1));
        assert_eq!(item.genre, "Drama");
        assert_eq!(item.year, 1994);
        assert_eq!(item.rating, 9.3);
        assert_eq!(item.poster_url, None);
        assert_eq!(item.trailer_id, None);
    }

    #[test]
    fn test_user_preferences_into_preference_set() {
        let json = r#"{"user_id": "user_1", "liked_movies": [1, 3], "disliked_movies": [2]}"#;
        let api: ApiUserPreferences = serde_json::from_str(json).unwrap();

        let set: PreferenceSet = api.into();
        assert_eq!(set.liked(), &[MovieId(1), MovieId(3)]);
        assert_eq!(set.disliked(), &[MovieId(2)]);
    }

    #[test]
    fn test_user_preferences_missing_lists_default_to_empty() {
        let api: ApiUserPreferences = serde_json::from_str(r#"{"user_id": "user_9"}"#).unwrap();
        assert!(api.liked_movies.is_empty());
        assert!(api.disliked_movies.is_empty());
    }
}
