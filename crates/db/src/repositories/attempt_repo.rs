//! Repository for the `quiz_attempts` table. Attempts are never updated.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::attempt::{Attempt, AttemptWithTopic, CreateAttempt};

const COLUMNS: &str =
    "id, user_id, topic_id, score, total_questions, percentage, difficulty_level, attempt_date";

const JOINED_COLUMNS: &str = "qa.id, qa.user_id, qa.topic_id, t.title AS topic_name, qa.score, \
                              qa.total_questions, qa.percentage, qa.difficulty_level, \
                              t.difficulty_level AS topic_difficulty, qa.attempt_date";

/// Provides attempt inserts and per-user history reads.
pub struct AttemptRepo;

impl AttemptRepo {
    /// Record a graded attempt.
    pub async fn create(pool: &PgPool, input: &CreateAttempt) -> Result<Attempt, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_attempts \
                (user_id, topic_id, score, total_questions, percentage, difficulty_level) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attempt>(&query)
            .bind(input.user_id)
            .bind(input.topic_id)
            .bind(input.score)
            .bind(input.total_questions)
            .bind(input.percentage)
            .bind(input.difficulty_level.as_str())
            .fetch_one(pool)
            .await
    }

    /// A user's attempts joined with topic info, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttemptWithTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM quiz_attempts qa \
             JOIN topics t ON qa.topic_id = t.id \
             WHERE qa.user_id = $1 \
             ORDER BY qa.attempt_date DESC, qa.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AttemptWithTopic>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recent attempts of a user, newest first.
    pub async fn recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<AttemptWithTopic>, sqlx::Error> {
        Self::list_for_user(pool, user_id, limit, 0).await
    }
}
