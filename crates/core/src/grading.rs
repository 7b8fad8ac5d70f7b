//! Quiz grading.
//!
//! The client only submits answers; score and percentage are always computed
//! here from the stored answer key.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::levels::OptionLetter;
use crate::types::DbId;

/// The stored correct option for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerKey {
    pub question_id: DbId,
    pub correct_option: OptionLetter,
}

/// Outcome of grading one quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: i32,
    pub total_questions: i32,
    /// Unrounded `score / total * 100`.
    pub percentage: f64,
}

/// Grade a submission against a topic's answer key.
///
/// Unanswered questions and unparseable letters count as wrong. Answers for
/// question ids that are not part of the key are ignored.
///
/// Returns `CoreError::Validation` when the key is empty, since a topic with
/// no questions has no defined percentage.
pub fn grade(
    key: &[AnswerKey],
    answers: &HashMap<DbId, String>,
) -> Result<QuizResult, CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation(
            "Topic has no questions to grade".to_string(),
        ));
    }

    let score = key
        .iter()
        .filter(|k| {
            answers
                .get(&k.question_id)
                .and_then(|a| a.parse::<OptionLetter>().ok())
                == Some(k.correct_option)
        })
        .count() as i32;
    let total_questions = key.len() as i32;

    Ok(QuizResult {
        score,
        total_questions,
        percentage: percentage(score, total_questions),
    })
}

/// `score / total * 100`. `grade` guarantees `total > 0`.
fn percentage(score: i32, total: i32) -> f64 {
    f64::from(score) / f64::from(total) * 100.0
}

/// Round a stored percentage to a whole number for display.
pub fn display_percentage(percentage: f64) -> i64 {
    percentage.round() as i64
}
