//! Repository for the `quiz_questions` table.

use learnpath_core::catalog::SeedQuestion;
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

const COLUMNS: &str = "id, topic_id, question_text, option_a, option_b, option_c, option_d, \
                       correct_option, difficulty_level";

/// Provides question reads, inserts and seeding.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions \
                (topic_id, question_text, option_a, option_b, option_c, option_d, \
                 correct_option, difficulty_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.topic_id)
            .bind(&input.question_text)
            .bind(&input.option_a)
            .bind(&input.option_b)
            .bind(&input.option_c)
            .bind(&input.option_d)
            .bind(input.correct_option.as_str())
            .bind(input.difficulty_level.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all questions of a topic in insertion order.
    pub async fn list_by_topic(pool: &PgPool, topic_id: DbId) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quiz_questions WHERE topic_id = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(topic_id)
            .fetch_all(pool)
            .await
    }

    /// Insert seed questions for topics that exist (matched by title),
    /// skipping duplicates. Returns the number of rows inserted.
    pub async fn seed(pool: &PgPool, questions: &[SeedQuestion]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for q in questions {
            let [a, b, c, d] = q.options;
            let result = sqlx::query(
                "INSERT INTO quiz_questions \
                    (topic_id, question_text, option_a, option_b, option_c, option_d, \
                     correct_option, difficulty_level) \
                 SELECT t.id, $2, $3, $4, $5, $6, $7, $8 FROM topics t WHERE t.title = $1 \
                 ON CONFLICT ON CONSTRAINT uq_quiz_questions_topic_text DO NOTHING",
            )
            .bind(q.topic_title)
            .bind(q.question_text)
            .bind(a)
            .bind(b)
            .bind(c)
            .bind(d)
            .bind(q.correct_option.as_str())
            .bind(q.difficulty.as_str())
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
