//! Route definitions for the `/recommendations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET /{user_id}          -> get_recommendation (requires auth)
/// GET /history/{user_id} -> get_history (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(recommendations::get_recommendation))
        .route("/history/{user_id}", get(recommendations::get_history))
}
