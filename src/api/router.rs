use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::chat;
use super::health;
use super::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(chat::chat_page))
        .route("/get", post(chat::get_answer))
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
