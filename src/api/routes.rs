use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog", get(handlers::get_catalog))
        .route("/catalog/options", get(handlers::get_filter_options))
        // Preferences
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences/:movie_id/like", post(handlers::like_movie))
        .route("/preferences/:movie_id/dislike", post(handlers::dislike_movie))
        // Derived views
        .route("/insights", get(handlers::get_insights))
        .route("/recommendations", get(handlers::get_recommendations))
        // Session
        .route("/mode", get(handlers::get_mode).put(handlers::set_mode))
        .route("/session/reload", post(handlers::reload_session))
}
