//! Repository for the `users` table.

use learnpath_core::levels::Level;
use learnpath_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, current_level, created_at";

/// Provides account creation and lookups.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user at the default level, returning the created row.
    ///
    /// A duplicate email violates `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a user's level. Returns `true` if the row was updated.
    ///
    /// Only [`RecommendationRepo::record`](super::RecommendationRepo::record)
    /// calls this, inside its transaction.
    pub(crate) async fn update_level(
        conn: &mut PgConnection,
        id: DbId,
        level: Level,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET current_level = $2 WHERE id = $1")
            .bind(id)
            .bind(level.as_str())
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
