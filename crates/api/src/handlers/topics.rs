//! Handlers for the `/topics` resource.

use axum::extract::{Path, State};
use axum::Json;
use learnpath_core::catalog::SEED_TOPICS;
use learnpath_core::error::CoreError;
use learnpath_core::types::DbId;
use learnpath_db::models::question::QuestionResponse;
use learnpath_db::models::topic::Topic;
use learnpath_db::repositories::{QuestionRepo, TopicRepo};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, SeedResponse};
use crate::state::AppState;

/// GET /api/topics
///
/// The full catalog, easiest tier first.
pub async fn list_topics(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Topic>>>> {
    let topics = TopicRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/topics/{id}/questions
///
/// Questions for one topic, without their correct options.
pub async fn list_questions(
    State(state): State<AppState>,
    Path(topic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<QuestionResponse>>>> {
    TopicRepo::find_by_id(&state.pool, topic_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id: topic_id,
        }))?;

    let questions = QuestionRepo::list_by_topic(&state.pool, topic_id)
        .await?
        .into_iter()
        .map(QuestionResponse::from)
        .collect();

    Ok(Json(DataResponse { data: questions }))
}

/// POST /api/topics/seed
///
/// Insert the starter catalog. Existing titles are left untouched.
pub async fn seed_topics(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    let inserted = TopicRepo::seed(&state.pool, SEED_TOPICS).await?;
    tracing::info!(inserted, "Seeded topics");

    Ok(Json(SeedResponse {
        inserted,
        message: "Topics seeded successfully",
    }))
}
