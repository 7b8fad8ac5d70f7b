//! Repository for the append-only `recommendations` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::recommendation::{CreateRecommendation, RecommendationRecord};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, user_id, recommended_topic, difficulty_adjustment, current_level, \
                       reasoning, recommendation_reason, generated_at";

/// Provides recommendation inserts and history reads.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// Append a recommendation and set the user's level to the one it carries.
    ///
    /// Both writes happen in one transaction. Returns `RowNotFound` (and
    /// writes nothing) if the user does not exist.
    pub async fn record(
        pool: &PgPool,
        input: &CreateRecommendation,
    ) -> Result<RecommendationRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !UserRepo::update_level(&mut tx, input.user_id, input.current_level).await? {
            return Err(sqlx::Error::RowNotFound);
        }

        let query = format!(
            "INSERT INTO recommendations \
                (user_id, recommended_topic, difficulty_adjustment, current_level, \
                 reasoning, recommendation_reason) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, RecommendationRecord>(&query)
            .bind(input.user_id)
            .bind(&input.recommended_topic)
            .bind(input.difficulty_adjustment.as_str())
            .bind(input.current_level.as_str())
            .bind(&input.reasoning)
            .bind(&input.recommendation_reason)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// A user's recommendation history, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecommendationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations \
             WHERE user_id = $1 \
             ORDER BY generated_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RecommendationRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
