//! Route definitions for the `/topics` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Routes mounted at `/topics`.
///
/// ```text
/// GET  /                -> list_topics
/// POST /seed            -> seed_topics
/// GET  /{id}/questions  -> list_questions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list_topics))
        .route("/seed", post(topics::seed_topics))
        .route("/{id}/questions", get(topics::list_questions))
}
