pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form page
        .route("/", get(handlers::handle_index))
        .route("/submit", post(handlers::handle_submit))
        // JSON API
        .route(
            "/api/v1/submissions",
            post(handlers::handle_create_submission),
        )
        .route(
            "/api/v1/session",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .with_state(state)
}
