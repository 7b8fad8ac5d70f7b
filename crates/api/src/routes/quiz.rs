//! Route definitions for the `/quiz` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quiz`.
///
/// ```text
/// POST /attempt              -> submit_attempt (requires auth)
/// GET  /progress/{user_id}   -> get_progress (requires auth)
/// POST /seed-questions       -> seed_questions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attempt", post(quiz::submit_attempt))
        .route("/progress/{user_id}", get(quiz::get_progress))
        .route("/seed-questions", post(quiz::seed_questions))
}
