//! Session state and its transitions.
//!
//! All state for one user session lives in a single [`SessionState`] value.
//! It changes only through [`reduce`], which maps the current state and a
//! [`Command`] to a new state. [`SessionHandle`] swaps the new state in under a
//! write lock, so readers always see either the old or the new state in full.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{CatalogItem, MovieId, PreferenceSet, RecommendationMode},
    store::{CatalogStore, PreferenceStore},
};

pub mod memo;

pub use memo::Memo;

/// Who the session belongs to and which recommendation mode is active
///
/// Created at session start. The mode changes only through [`Command::SetMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    user_id: String,
    mode: RecommendationMode,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, mode: RecommendationMode) -> Self {
        Self {
            user_id: user_id.into(),
            mode,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn mode(&self) -> RecommendationMode {
        self.mode
    }
}

/// Progress of the most recent fetch from the recommendation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Failed { message: String },
}

/// Identifies one recommendation request so late responses can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationTicket {
    pub seq: u64,
    pub mode: RecommendationMode,
}

/// State transitions of a session
#[derive(Debug, Clone)]
pub enum Command {
    LoadStarted,
    CatalogLoaded(Vec<CatalogItem>),
    PreferencesLoaded(PreferenceSet),
    MarkLiked(MovieId),
    MarkDisliked(MovieId),
    /// Switches mode and drops the recommendations of the previous mode
    SetMode(RecommendationMode),
    RecommendationsRequested(RecommendationTicket),
    RecommendationsLoaded {
        ticket: RecommendationTicket,
        items: Vec<CatalogItem>,
    },
    RecommendationsFailed {
        ticket: RecommendationTicket,
        message: String,
    },
    LoadFailed(String),
    ClearError,
}

/// Everything one session knows
///
/// Cheap to clone; a clone is a consistent snapshot.
#[derive(Debug, Clone)]
pub struct SessionState {
    context: SessionContext,
    catalog: CatalogStore,
    preferences: PreferenceStore,
    recommendations: Arc<Vec<CatalogItem>>,
    catalog_status: LoadStatus,
    recommendation_status: LoadStatus,
    issued_requests: u64,
    applied_request: u64,
}

impl SessionState {
    pub fn new(context: SessionContext) -> Self {
        Self {
            context,
            catalog: CatalogStore::new(),
            preferences: PreferenceStore::new(),
            recommendations: Arc::new(Vec::new()),
            catalog_status: LoadStatus::Idle,
            recommendation_status: LoadStatus::Idle,
            issued_requests: 0,
            applied_request: 0,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn preferences(&self) -> Arc<PreferenceSet> {
        self.preferences.current_preferences()
    }

    pub fn recommendations(&self) -> &[CatalogItem] {
        &self.recommendations
    }

    /// Progress of the catalog load
    pub fn catalog_status(&self) -> &LoadStatus {
        &self.catalog_status
    }

    /// Progress of the latest recommendation fetch
    pub fn recommendation_status(&self) -> &LoadStatus {
        &self.recommendation_status
    }

    /// Key for derived values that depend on the catalog and the preferences
    pub fn derived_key(&self) -> (u64, u64) {
        (self.catalog.version(), self.preferences.version())
    }

    /// Ticket the next recommendation request should carry
    pub fn next_ticket(&self) -> RecommendationTicket {
        RecommendationTicket {
            seq: self.issued_requests + 1,
            mode: self.context.mode,
        }
    }

    /// Whether a response for `ticket` must be thrown away
    ///
    /// True once a newer response has been applied, or the mode has changed
    /// since the request was issued.
    pub fn is_stale(&self, ticket: &RecommendationTicket) -> bool {
        ticket.seq <= self.applied_request || ticket.mode != self.context.mode
    }
}

/// Applies `command` to `state`, returning the resulting state
pub fn reduce(state: &SessionState, command: Command) -> SessionState {
    let mut next = state.clone();

    match command {
        Command::LoadStarted => next.catalog_status = LoadStatus::Loading,
        Command::CatalogLoaded(items) => {
            next.catalog.replace(items);
            next.catalog_status = LoadStatus::Idle;
        }
        Command::PreferencesLoaded(set) => {
            next.preferences
                .replace_preferences(set.liked().to_vec(), set.disliked().to_vec());
        }
        Command::MarkLiked(id) => next.preferences.mark_liked(id),
        Command::MarkDisliked(id) => next.preferences.mark_disliked(id),
        Command::SetMode(mode) => {
            if mode != next.context.mode {
                next.context.mode = mode;
                next.recommendations = Arc::new(Vec::new());
                // responses still in flight belong to the old mode
                next.applied_request = next.issued_requests;
                if next.recommendation_status == LoadStatus::Loading {
                    next.recommendation_status = LoadStatus::Idle;
                }
            }
        }
        Command::RecommendationsRequested(ticket) => {
            next.issued_requests = next.issued_requests.max(ticket.seq);
            next.recommendation_status = LoadStatus::Loading;
        }
        Command::RecommendationsLoaded { ticket, items } => {
            if state.is_stale(&ticket) {
                tracing::debug!(
                    seq = ticket.seq,
                    mode = %ticket.mode,
                    "Discarding stale recommendations"
                );
                return next;
            }
            next.recommendations = Arc::new(items);
            next.applied_request = ticket.seq;
            if ticket.seq == next.issued_requests {
                next.recommendation_status = LoadStatus::Idle;
            }
        }
        Command::RecommendationsFailed { ticket, message } => {
            if state.is_stale(&ticket) {
                return next;
            }
            next.applied_request = ticket.seq;
            next.recommendation_status = LoadStatus::Failed { message };
        }
        Command::LoadFailed(message) => next.catalog_status = LoadStatus::Failed { message },
        Command::ClearError => {
            for status in [&mut next.catalog_status, &mut next.recommendation_status] {
                if matches!(status, LoadStatus::Failed { .. }) {
                    *status = LoadStatus::Idle;
                }
            }
        }
    }

    next
}

/// Shared, lock-protected session state
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn new(context: SessionContext) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new(context))),
        }
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Applies a command and returns the resulting state
    pub async fn dispatch(&self, command: Command) -> SessionState {
        let mut guard = self.state.write().await;
        *guard = reduce(&guard, command);
        guard.clone()
    }

    /// Issues a ticket and records the request in one step
    ///
    /// Returns the ticket along with the context the request must be made for.
    pub async fn begin_recommendation_request(&self) -> (RecommendationTicket, SessionContext) {
        let mut guard = self.state.write().await;
        let ticket = guard.next_ticket();
        *guard = reduce(&guard, Command::RecommendationsRequested(ticket));
        (ticket, guard.context.clone())
    }
}
