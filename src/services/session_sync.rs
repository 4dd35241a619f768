//! Keeps the local session in step with the recommendation service.
//!
//! Local state is authoritative for display. Preference changes are applied
//! locally before the service is told about them and are never rolled back.
//! Recommendation responses pass through the session's stale guard, so a slow
//! response cannot overwrite a newer one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{MovieId, PreferenceSet, RecommendationMode},
    services::providers::RecommenderClient,
    session::{Command, SessionHandle, SessionState},
};

/// Outcome of loading the catalog and stored preferences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionLoad {
    pub catalog_size: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub preferences_loaded: bool,
}

/// Outcome of a like/dislike action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceUpdate {
    pub preferences: Arc<PreferenceSet>,
    /// False when the service could not be told; the local change stands
    pub synced: bool,
}

/// Loads the catalog and the user's stored preferences into the session
///
/// A catalog failure is returned and recorded as the session's error state.
/// A preference failure only logs; the session keeps its current preferences.
pub async fn load_session(
    session: &SessionHandle,
    client: &dyn RecommenderClient,
) -> AppResult<SessionLoad> {
    session.dispatch(Command::LoadStarted).await;

    let items = match client.fetch_catalog().await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(error = %e, provider = client.name(), "Catalog load failed");
            session.dispatch(Command::LoadFailed(e.to_string())).await;
            return Err(e);
        }
    };
    let state = session.dispatch(Command::CatalogLoaded(items)).await;
    let catalog_size = state.catalog().len();
    let loaded_at = state.catalog().loaded_at();

    let user_id = state.context().user_id().to_string();
    let preferences_loaded = match client.fetch_preferences(&user_id).await {
        Ok(preferences) => {
            session
                .dispatch(Command::PreferencesLoaded(preferences.into()))
                .await;
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to load user preferences");
            false
        }
    };

    tracing::info!(catalog_size, preferences_loaded, "Session loaded");

    Ok(SessionLoad {
        catalog_size,
        loaded_at,
        preferences_loaded,
    })
}

/// Adopts the service's current mode, keeping the local one if it cannot be read
pub async fn sync_mode(
    session: &SessionHandle,
    client: &dyn RecommenderClient,
) -> RecommendationMode {
    match client.get_mode().await {
        Ok(mode) => session
            .dispatch(Command::SetMode(mode))
            .await
            .context()
            .mode(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read recommendation mode, keeping local mode");
            session.snapshot().await.context().mode()
        }
    }
}

/// Likes or dislikes a movie locally, then mirrors it to the service
pub async fn rate_movie(
    session: &SessionHandle,
    client: &dyn RecommenderClient,
    movie_id: MovieId,
    liked: bool,
) -> PreferenceUpdate {
    let command = if liked {
        Command::MarkLiked(movie_id)
    } else {
        Command::MarkDisliked(movie_id)
    };
    let state = session.dispatch(command).await;

    let synced = match client
        .submit_preference(state.context().user_id(), movie_id, liked)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                error = %e,
                movie_id = %movie_id,
                liked,
                "Preference not recorded by recommendation service, keeping local change"
            );
            false
        }
    };

    PreferenceUpdate {
        preferences: state.preferences(),
        synced,
    }
}

/// Fetches recommendations for the current mode and applies them if still current
///
/// Returns the session state after the response was applied or discarded.
pub async fn refresh_recommendations(
    session: &SessionHandle,
    client: &dyn RecommenderClient,
    limit: usize,
) -> AppResult<SessionState> {
    let (ticket, context) = session.begin_recommendation_request().await;

    match client.fetch_recommendations(&context, limit).await {
        Ok(items) => Ok(session
            .dispatch(Command::RecommendationsLoaded { ticket, items })
            .await),
        Err(e) => {
            tracing::error!(
                error = %e,
                transient = e.is_transient(),
                mode = %ticket.mode,
                provider = client.name(),
                "Recommendation fetch failed"
            );
            session
                .dispatch(Command::RecommendationsFailed {
                    ticket,
                    message: e.to_string(),
                })
                .await;
            Err(e)
        }
    }
}

/// Switches the service-wide mode, then the session's
///
/// The local mode only changes once the service has accepted the new one.
/// Switching drops the current recommendation list.
pub async fn change_mode(
    session: &SessionHandle,
    client: &dyn RecommenderClient,
    mode: RecommendationMode,
) -> AppResult<RecommendationMode> {
    let confirmed = client.set_mode(mode).await?;
    let state = session.dispatch(Command::SetMode(confirmed)).await;
    Ok(state.context().mode())
}
