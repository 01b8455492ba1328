use crate::api;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/health_check", get(api::health_check))
        .route("/users", post(api::register_user))
        .route("/recordings", post(api::register_recording))
        .route("/likes", post(api::register_like))
        .route("/comments", post(api::register_comment))
        .route("/plays", post(api::register_play))
        .route("/follows", post(api::register_follow))
        .route("/recordings/trending", get(api::get_trending_recordings))
        .route("/users/rising-talent", get(api::get_rising_talent))
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

pub async fn start_http_server(pool: SqlitePool, bind_address: &str) -> Result<()> {
    let app = create_router(pool);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
