use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    models::AnalyticsSnapshot,
    services::providers::RecommenderClient,
    session::{Memo, SessionContext, SessionHandle},
};

/// Cached analytics snapshot, keyed on (catalog version, preferences version)
pub type AnalyticsMemo = Memo<(u64, u64), AnalyticsSnapshot>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub client: Arc<dyn RecommenderClient>,
    pub config: Arc<Config>,
    pub analytics: Arc<Mutex<AnalyticsMemo>>,
}

impl AppState {
    /// Creates state for a fresh session of the configured user
    pub fn new(config: Config, client: Arc<dyn RecommenderClient>) -> Self {
        let context = SessionContext::new(config.user_id.clone(), config.default_mode);
        Self {
            session: SessionHandle::new(context),
            client,
            config: Arc::new(config),
            analytics: Arc::new(Mutex::new(Memo::new())),
        }
    }
}
