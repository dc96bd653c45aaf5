pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::spellcheck::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/spellcheck", post(handlers::handle_spellcheck))
        .route(
            "/api/v1/spellcheck/foreign-worker",
            post(handlers::handle_foreign_worker_check),
        )
        .route("/api/v1/resumes/check", post(handlers::handle_resume_check))
        .with_state(state)
}
