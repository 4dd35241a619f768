use serde::Deserialize;

use crate::models::RecommendationMode;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation/catalog service
    #[serde(default = "default_recommender_api_url")]
    pub recommender_api_url: String,

    /// User the session is opened for
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Recommendation mode the session starts in
    #[serde(default)]
    pub default_mode: RecommendationMode,

    /// Number of recommendations requested per fetch
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Length of the Top-N views on the insights endpoint
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Timeout for calls to the recommendation service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_recommender_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_id() -> String {
    "user_1".to_string()
}

fn default_recommendation_limit() -> usize {
    10
}

fn default_top_n() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recommender_api_url: default_recommender_api_url(),
            user_id: default_user_id(),
            default_mode: RecommendationMode::default(),
            recommendation_limit: default_recommendation_limit(),
            top_n: default_top_n(),
            request_timeout_secs: default_request_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the session API listens on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
