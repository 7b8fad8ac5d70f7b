use std::str::FromStr;

use learnpath_core::recommendation::HeuristicThresholds;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Cutoffs used by the recommendation heuristic.
    pub recommendation: HeuristicThresholds,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REC_*`                | see [`thresholds_from_env`]|
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or an unusable threshold combination.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", 5000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        let jwt = JwtConfig::from_env();

        let recommendation = thresholds_from_env();
        if let Err(e) = recommendation.validate() {
            panic!("Invalid recommendation thresholds: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            recommendation,
        }
    }
}

/// Read heuristic overrides, falling back to [`HeuristicThresholds::default`].
///
/// | Env Var                          | Default |
/// |----------------------------------|---------|
/// | `REC_HISTORY_WINDOW`             | `20`    |
/// | `REC_RECENT_WINDOW`              | `5`     |
/// | `REC_OLDER_WINDOW`               | `5`     |
/// | `REC_TREND_DELTA`                | `5`     |
/// | `REC_CONSISTENCY_VARIANCE`       | `100`   |
/// | `REC_MASTERY_AVERAGE`            | `80`    |
/// | `REC_MASTERY_MIN_ATTEMPTS`       | `2`     |
/// | `REC_STRUGGLING_AVERAGE`         | `60`    |
/// | `REC_IMPROVING_INCREASE_AVERAGE` | `85`    |
/// | `REC_MASTERY_INCREASE_AVERAGE`   | `75`    |
/// | `REC_MASTERY_INCREASE_TOPICS`    | `2`     |
/// | `REC_ADVANCED_AVERAGE`           | `80`    |
/// | `REC_ADVANCED_MASTERED`          | `3`     |
/// | `REC_INTERMEDIATE_AVERAGE`       | `60`    |
pub fn thresholds_from_env() -> HeuristicThresholds {
    let d = HeuristicThresholds::default();
    HeuristicThresholds {
        history_window: env_or("REC_HISTORY_WINDOW", d.history_window),
        recent_window: env_or("REC_RECENT_WINDOW", d.recent_window),
        older_window: env_or("REC_OLDER_WINDOW", d.older_window),
        trend_delta: env_or("REC_TREND_DELTA", d.trend_delta),
        consistency_variance: env_or("REC_CONSISTENCY_VARIANCE", d.consistency_variance),
        mastery_average: env_or("REC_MASTERY_AVERAGE", d.mastery_average),
        mastery_min_attempts: env_or("REC_MASTERY_MIN_ATTEMPTS", d.mastery_min_attempts),
        struggling_average: env_or("REC_STRUGGLING_AVERAGE", d.struggling_average),
        improving_increase_average: env_or(
            "REC_IMPROVING_INCREASE_AVERAGE",
            d.improving_increase_average,
        ),
        mastery_increase_average: env_or(
            "REC_MASTERY_INCREASE_AVERAGE",
            d.mastery_increase_average,
        ),
        mastery_increase_topics: env_or("REC_MASTERY_INCREASE_TOPICS", d.mastery_increase_topics),
        advanced_average: env_or("REC_ADVANCED_AVERAGE", d.advanced_average),
        advanced_mastered_topics: env_or("REC_ADVANCED_MASTERED", d.advanced_mastered_topics),
        intermediate_average: env_or("REC_INTERMEDIATE_AVERAGE", d.intermediate_average),
    }
}

/// Parse `key` from the environment, or return `default` when it is unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
