use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        ApiMode, CatalogItem, FilterCriteria, FilterOptions, FilterQuery, MovieId, PreferenceSet,
        RecommendationMode, ViewState,
    },
    services::{
        analytics::{self, InsightsReport},
        filter,
        recommendations::{self, AnnotatedItem},
        session_sync::{self, PreferenceUpdate, SessionLoad},
    },
    session::{LoadStatus, SessionState},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ModeResponse {
    pub mode: RecommendationMode,
    pub label: &'static str,
}

impl From<RecommendationMode> for ModeResponse {
    fn from(mode: RecommendationMode) -> Self {
        Self {
            mode,
            label: mode.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    #[serde(flatten)]
    pub load: SessionLoad,
    pub mode: RecommendationMode,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Catalog filtered and sorted by the query string
///
/// Reports `loading` or `failed` while no catalog has been loaded yet, and
/// `empty` when nothing survives the filters.
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<ViewState<CatalogItem>> {
    let session = state.session.snapshot().await;
    let criteria = FilterCriteria::from(query);
    Json(catalog_view(&session, &criteria))
}

fn catalog_view(session: &SessionState, criteria: &FilterCriteria) -> ViewState<CatalogItem> {
    if !session.catalog().is_loaded() {
        return match session.catalog_status() {
            LoadStatus::Failed { message } => ViewState::Failed {
                message: message.clone(),
            },
            LoadStatus::Idle | LoadStatus::Loading => ViewState::Loading,
        };
    }
    ViewState::from_items(filter::apply(session.catalog().items(), criteria))
}

/// Values available for the genre, year and director filters
pub async fn get_filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    let session = state.session.snapshot().await;
    Json(filter::options(session.catalog().items()))
}

/// Current liked and disliked movies
pub async fn get_preferences(State(state): State<AppState>) -> Json<Arc<PreferenceSet>> {
    Json(state.session.snapshot().await.preferences())
}

/// Like a movie
///
/// Ids are not checked against the catalog; unknown ids are kept and counted.
pub async fn like_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<u64>,
) -> Json<PreferenceUpdate> {
    rate(state, request_id, MovieId(movie_id), true).await
}

/// Dislike a movie
pub async fn dislike_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<u64>,
) -> Json<PreferenceUpdate> {
    rate(state, request_id, MovieId(movie_id), false).await
}

async fn rate(
    state: AppState,
    request_id: RequestId,
    movie_id: MovieId,
    liked: bool,
) -> Json<PreferenceUpdate> {
    tracing::info!(
        request_id = %request_id,
        movie_id = %movie_id,
        liked,
        "Rating movie"
    );

    let update =
        session_sync::rate_movie(&state.session, state.client.as_ref(), movie_id, liked).await;
    Json(update)
}

/// Preference analytics with Top-N views
///
/// The snapshot is only recomputed when the catalog or the preferences changed.
pub async fn get_insights(State(state): State<AppState>) -> Json<InsightsReport> {
    let session = state.session.snapshot().await;

    let snapshot = {
        let mut memo = state.analytics.lock().await;
        memo.get_or_compute(session.derived_key(), || {
            tracing::debug!(key = ?session.derived_key(), "Recomputing analytics snapshot");
            analytics::compute(session.catalog().items(), &session.preferences())
        })
    };

    Json(InsightsReport::new(
        (*snapshot).clone(),
        state.config.top_n,
        session.recommendations().len(),
    ))
}

/// Fetches recommendations for the current mode and renders them
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ViewState<AnnotatedItem>> {
    tracing::info!(request_id = %request_id, "Fetching recommendations");

    let view = match session_sync::refresh_recommendations(
        &state.session,
        state.client.as_ref(),
        state.config.recommendation_limit,
    )
    .await
    {
        Ok(session) => recommendations::render(session.recommendations(), &session.preferences()),
        Err(e) => ViewState::Failed {
            message: e.to_string(),
        },
    };

    tracing::info!(
        request_id = %request_id,
        count = view.items().len(),
        "Recommendations rendered"
    );

    Json(view)
}

/// Active recommendation mode
pub async fn get_mode(State(state): State<AppState>) -> Json<ModeResponse> {
    let mode = state.session.snapshot().await.context().mode();
    Json(mode.into())
}

/// Switches the recommendation mode
///
/// Drops the current recommendations; the caller fetches a new list afterwards.
pub async fn set_mode(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ApiMode>,
) -> AppResult<Json<ModeResponse>> {
    tracing::info!(request_id = %request_id, mode = %request.mode, "Changing recommendation mode");

    let mode = session_sync::change_mode(&state.session, state.client.as_ref(), request.mode).await?;
    Ok(Json(mode.into()))
}

/// Reloads the catalog and the stored preferences
pub async fn reload_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ReloadResponse>> {
    tracing::info!(request_id = %request_id, "Reloading session");

    let load = session_sync::load_session(&state.session, state.client.as_ref()).await?;
    let mode = session_sync::sync_mode(&state.session, state.client.as_ref()).await;
    Ok(Json(ReloadResponse { load, mode }))
}
