//! Repository for the `topics` table.

use learnpath_core::catalog::SeedTopic;
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::topic::{CreateTopic, Topic};

const COLUMNS: &str = "id, title, description, difficulty_level";

/// Orders by tier (Easy, Medium, Hard), then insertion order.
const TIER_ORDER: &str = "CASE difficulty_level \
                              WHEN 'Easy' THEN 0 \
                              WHEN 'Medium' THEN 1 \
                              ELSE 2 \
                          END, id";

/// Provides catalog reads and seeding.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a topic, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTopic) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics (title, description, difficulty_level)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.difficulty_level.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a topic by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog, easiest tier first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics ORDER BY {TIER_ORDER}");
        sqlx::query_as::<_, Topic>(&query).fetch_all(pool).await
    }

    /// Insert seed topics, skipping titles that already exist.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn seed(pool: &PgPool, topics: &[SeedTopic]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for topic in topics {
            let result = sqlx::query(
                "INSERT INTO topics (title, description, difficulty_level)
                 VALUES ($1, $2, $3)
                 ON CONFLICT ON CONSTRAINT uq_topics_title DO NOTHING",
            )
            .bind(topic.title)
            .bind(topic.description)
            .bind(topic.difficulty.as_str())
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
