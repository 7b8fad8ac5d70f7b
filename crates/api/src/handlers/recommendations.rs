//! Handlers for the `/recommendations` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::recommendation::{recommend, CatalogTopic, Recommendation, ScoredAttempt};
use learnpath_core::types::DbId;
use learnpath_db::models::recommendation::{CreateRecommendation, RecommendationRecord};
use learnpath_db::repositories::{AttemptRepo, RecommendationRepo, TopicRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A freshly generated recommendation.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Display identifier, `U{user_id}`.
    pub student_id: String,
    pub user_id: DbId,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

/// GET /api/recommendations/{user_id}
///
/// Run the heuristic over the learner's recent attempts. Recommendations
/// backed by real history are stored and update the learner's level; the
/// new-learner default is returned without writing anything.
pub async fn get_recommendation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecommendationResponse>>> {
    auth_user.ensure_self(user_id)?;

    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let thresholds = &state.config.recommendation;
    let window = i64::try_from(thresholds.history_window).unwrap_or(i64::MAX);

    let attempts: Vec<ScoredAttempt> = AttemptRepo::recent_for_user(&state.pool, user_id, window)
        .await?
        .iter()
        .map(ScoredAttempt::from)
        .collect();
    let catalog: Vec<CatalogTopic> = TopicRepo::list(&state.pool)
        .await?
        .iter()
        .map(CatalogTopic::from)
        .collect();

    let recommendation = recommend(&attempts, &catalog, thresholds);

    if recommendation.is_from_history() {
        RecommendationRepo::record(
            &state.pool,
            &CreateRecommendation::from_recommendation(user_id, &recommendation),
        )
        .await?;
    }

    tracing::info!(
        user_id,
        attempts = attempts.len(),
        topic = %recommendation.recommended_topic,
        adjustment = %recommendation.difficulty_adjustment,
        level = %recommendation.current_level,
        "Recommendation generated",
    );

    Ok(Json(DataResponse {
        data: RecommendationResponse {
            student_id: format!("U{user_id}"),
            user_id,
            recommendation,
        },
    }))
}

/// GET /api/recommendations/history/{user_id}
///
/// Stored recommendations, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<RecommendationRecord>>>> {
    auth_user.ensure_self(user_id)?;

    let (limit, offset) = params.resolve();
    let history = RecommendationRepo::list_for_user(&state.pool, user_id, limit, offset).await?;

    Ok(Json(DataResponse { data: history }))
}
