//! Stored recommendation snapshots. Append-only per user.

use learnpath_core::levels::{DifficultyAdjustment, Level};
use learnpath_core::recommendation::Recommendation;
use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecommendationRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub recommended_topic: String,
    #[sqlx(try_from = "String")]
    pub difficulty_adjustment: DifficultyAdjustment,
    #[sqlx(try_from = "String")]
    pub current_level: Level,
    pub reasoning: String,
    pub recommendation_reason: Option<String>,
    pub generated_at: Timestamp,
}

/// DTO for appending a recommendation.
#[derive(Debug, Clone)]
pub struct CreateRecommendation {
    pub user_id: DbId,
    pub recommended_topic: String,
    pub difficulty_adjustment: DifficultyAdjustment,
    pub current_level: Level,
    pub reasoning: String,
    pub recommendation_reason: Option<String>,
}

impl CreateRecommendation {
    pub fn from_recommendation(user_id: DbId, rec: &Recommendation) -> Self {
        Self {
            user_id,
            recommended_topic: rec.recommended_topic.clone(),
            difficulty_adjustment: rec.difficulty_adjustment,
            current_level: rec.current_level,
            reasoning: rec.reasoning.clone(),
            recommendation_reason: rec.recommendation_reason.clone(),
        }
    }
}
