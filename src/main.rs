use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reel_insights::{
    api::{create_router, AppState},
    config::Config,
    services::{providers::HttpRecommender, session_sync},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reel_insights=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let address = config.bind_address();

    let client = HttpRecommender::new(
        config.recommender_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build recommendation service client")?;

    tracing::info!(
        recommender_api_url = %config.recommender_api_url,
        user_id = %config.user_id,
        mode = %config.default_mode,
        "Starting session"
    );

    let state = AppState::new(config, Arc::new(client));

    // The API stays up without a catalog; /api/v1/session/reload retries.
    if let Err(e) = session_sync::load_session(&state.session, state.client.as_ref()).await {
        tracing::warn!(error = %e, "Initial session load failed");
    }
    session_sync::sync_mode(&state.session, state.client.as_ref()).await;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
