use axum::{
    Router,
    routing::{get, patch},
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod contact;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub command: boomabrovers_contact::Command,
    pub query: boomabrovers_contact::Query,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/contact", get(contact::list).post(contact::submit))
        .route("/api/contact/{id}/status", patch(contact::update_status))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
