//! PostgreSQL persistence for the learnpath platform.
//!
//! - [`models`] -- row structs and insert DTOs.
//! - [`repositories`] -- zero-sized repos with async query methods.

pub mod models;
pub mod repositories;

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// How long an operation waits for a pooled connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
///
/// Connections are opened lazily, so this only fails on a malformed URL.
/// Use [`run_migrations_with_retry`] to wait for the server to come up.
pub fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Check the database is reachable, then apply migrations, retrying both
/// with linear backoff.
///
/// The database is often still starting when the server boots. Returns the
/// last error once `attempts` is exhausted.
pub async fn run_migrations_with_retry(
    pool: &DbPool,
    attempts: u32,
    base_delay: Duration,
) -> Result<(), MigrateError> {
    retry_with_backoff(attempts, base_delay, || async move {
        health_check(pool).await.map_err(MigrateError::Execute)?;
        run_migrations(pool).await
    })
    .await
}

/// Run `op` up to `attempts` times (at least once), sleeping
/// `base_delay * attempt` between failures.
pub async fn retry_with_backoff<T, E, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "Database startup step failed, retrying",
                );
                tokio::time::sleep(base_delay * attempt).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempts, error = %e, "Database startup failed after all retries");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn retry_succeeds_after_a_failed_attempt() {
        let mut calls = 0;
        let result: Result<u32, &str> = retry_with_backoff(3, TICK, || {
            calls += 1;
            let call = calls;
            async move {
                if call == 1 {
                    Err("connection refused")
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn retry_gives_up_after_all_attempts() {
        let mut calls = 0;
        let result: Result<(), &str> = retry_with_backoff(3, TICK, || {
            calls += 1;
            async { Err("still down") }
        })
        .await;

        assert_eq!(result, Err("still down"));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let mut calls = 0;
        let _: Result<(), &str> = retry_with_backoff(0, TICK, || {
            calls += 1;
            async { Err("down") }
        })
        .await;
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn pool_creation_does_not_connect() {
        // Nothing listens on port 1; a lazy pool is still created.
        assert!(create_pool("postgres://learnpath@127.0.0.1:1/learnpath").is_ok());
        assert!(create_pool("not a database url").is_err());
    }
}
