//! Quiz attempt models and DTOs. Attempts are insert-only.

use learnpath_core::levels::Difficulty;
use learnpath_core::recommendation::ScoredAttempt;
use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `quiz_attempts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attempt {
    pub id: DbId,
    pub user_id: DbId,
    pub topic_id: DbId,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    #[sqlx(try_from = "String")]
    pub difficulty_level: Difficulty,
    pub attempt_date: Timestamp,
}

/// An attempt joined with its topic's title and current difficulty.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttemptWithTopic {
    pub id: DbId,
    pub user_id: DbId,
    pub topic_id: DbId,
    pub topic_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    /// Difficulty recorded at the time of the attempt.
    #[sqlx(try_from = "String")]
    pub difficulty_level: Difficulty,
    #[sqlx(try_from = "String")]
    pub topic_difficulty: Difficulty,
    pub attempt_date: Timestamp,
}

impl From<&AttemptWithTopic> for ScoredAttempt {
    fn from(attempt: &AttemptWithTopic) -> Self {
        ScoredAttempt {
            topic_name: attempt.topic_name.clone(),
            percentage: attempt.percentage,
        }
    }
}

/// DTO for recording a graded attempt.
#[derive(Debug, Clone)]
pub struct CreateAttempt {
    pub user_id: DbId,
    pub topic_id: DbId,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub difficulty_level: Difficulty,
}
