//! Quiz question model and DTOs.

use learnpath_core::grading::AnswerKey;
use learnpath_core::levels::{Difficulty, OptionLetter};
use learnpath_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quiz_questions` table, including the correct option.
///
/// Use [`QuestionResponse`] when sending questions to a quiz taker.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: DbId,
    pub topic_id: DbId,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    #[sqlx(try_from = "String")]
    pub correct_option: OptionLetter,
    #[sqlx(try_from = "String")]
    pub difficulty_level: Difficulty,
}

impl Question {
    pub fn answer_key(&self) -> AnswerKey {
        AnswerKey {
            question_id: self.id,
            correct_option: self.correct_option,
        }
    }
}

/// Question as shown to a quiz taker (no correct option).
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: DbId,
    pub topic_id: DbId,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub difficulty_level: Difficulty,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            topic_id: q.topic_id,
            question_text: q.question_text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            difficulty_level: q.difficulty_level,
        }
    }
}

/// DTO for creating a question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub topic_id: DbId,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: OptionLetter,
    pub difficulty_level: Difficulty,
}
