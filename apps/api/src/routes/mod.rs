pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/ai/status", get(handlers::handle_status))
        .route(
            "/api/ai/generate-sequence",
            post(handlers::handle_generate_sequence),
        )
        .fallback(not_found)
        .with_state(state)
}
