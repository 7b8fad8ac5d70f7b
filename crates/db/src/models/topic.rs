//! Topic catalog model and DTOs.

use learnpath_core::levels::Difficulty;
use learnpath_core::recommendation::CatalogTopic;
use learnpath_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub difficulty_level: Difficulty,
}

impl From<&Topic> for CatalogTopic {
    fn from(topic: &Topic) -> Self {
        CatalogTopic {
            title: topic.title.clone(),
            difficulty: topic.difficulty_level,
        }
    }
}

/// DTO for creating a topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopic {
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: Difficulty,
}
