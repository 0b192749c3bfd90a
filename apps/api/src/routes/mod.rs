pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/interviews", post(handlers::handle_create_interview))
        .route(
            "/api/v1/interviews/:id",
            delete(handlers::handle_close_interview),
        )
        .route(
            "/api/v1/interviews/:id/followup",
            post(handlers::handle_followup),
        )
        .route(
            "/api/v1/interviews/:id/evaluate",
            post(handlers::handle_evaluate),
        )
        .with_state(state)
}
