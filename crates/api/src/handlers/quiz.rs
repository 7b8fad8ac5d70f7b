//! Handlers for the `/quiz` resource (attempts, progress, question seeding).

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnpath_core::catalog::SEED_QUESTIONS;
use learnpath_core::error::CoreError;
use learnpath_core::grading::{grade, AnswerKey};
use learnpath_core::types::DbId;
use learnpath_db::models::attempt::{AttemptWithTopic, CreateAttempt};
use learnpath_db::repositories::{AttemptRepo, QuestionRepo, TopicRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, SeedResponse};
use crate::state::AppState;

/// Request body for `POST /quiz/attempt`.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    pub topic_id: DbId,
    /// Question id -> chosen option letter.
    #[serde(default)]
    pub answers: HashMap<DbId, String>,
}

/// Graded attempt returned to the learner.
#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub attempt_id: DbId,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub message: &'static str,
}

/// POST /api/quiz/attempt
///
/// Grade the submitted answers against the topic's key and record the
/// attempt for the authenticated learner.
pub async fn submit_attempt(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SubmitAttemptRequest>,
) -> AppResult<(StatusCode, Json<AttemptResponse>)> {
    let topic = TopicRepo::find_by_id(&state.pool, input.topic_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id: input.topic_id,
        }))?;

    let key: Vec<AnswerKey> = QuestionRepo::list_by_topic(&state.pool, topic.id)
        .await?
        .iter()
        .map(|q| q.answer_key())
        .collect();

    let result = grade(&key, &input.answers)?;

    let attempt = AttemptRepo::create(
        &state.pool,
        &CreateAttempt {
            user_id: auth_user.user_id,
            topic_id: topic.id,
            score: result.score,
            total_questions: result.total_questions,
            percentage: result.percentage,
            difficulty_level: topic.difficulty_level,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        topic_id = topic.id,
        attempt_id = attempt.id,
        score = result.score,
        total = result.total_questions,
        "Quiz attempt recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(AttemptResponse {
            attempt_id: attempt.id,
            score: result.score,
            total_questions: result.total_questions,
            percentage: result.percentage,
            message: "Quiz completed successfully",
        }),
    ))
}

/// GET /api/quiz/progress/{user_id}
///
/// The learner's attempts with topic names, newest first.
pub async fn get_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AttemptWithTopic>>>> {
    auth_user.ensure_self(user_id)?;

    let (limit, offset) = params.resolve();
    let attempts = AttemptRepo::list_for_user(&state.pool, user_id, limit, offset).await?;

    Ok(Json(DataResponse { data: attempts }))
}

/// POST /api/quiz/seed-questions
///
/// Insert the starter questions for topics that already exist.
pub async fn seed_questions(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    let inserted = QuestionRepo::seed(&state.pool, SEED_QUESTIONS).await?;
    tracing::info!(inserted, "Seeded questions");

    Ok(Json(SeedResponse {
        inserted,
        message: "Questions seeded successfully",
    }))
}
