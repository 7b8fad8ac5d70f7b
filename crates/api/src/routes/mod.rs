pub mod auth;
pub mod health;
pub mod quiz;
pub mod recommendations;
pub mod topics;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/me                                current user (auth)
///
/// /topics                                 list catalog
/// /topics/seed                            seed starter topics (POST)
/// /topics/{id}/questions                  questions for a topic
///
/// /quiz/attempt                           submit answers (POST, auth)
/// /quiz/progress/{user_id}                attempt history (auth, self only)
/// /quiz/seed-questions                    seed starter questions (POST)
///
/// /recommendations/{user_id}              generate recommendation (auth, self only)
/// /recommendations/history/{user_id}      stored recommendations (auth, self only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/topics", topics::router())
        .nest("/quiz", quiz::router())
        .nest("/recommendations", recommendations::router())
}
