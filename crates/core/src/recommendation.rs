//! Rule-based recommendation heuristic.
//!
//! Given a learner's most recent quiz attempts (newest first) and the topic
//! catalog, [`recommend`] decides:
//!
//! - a difficulty adjustment (increase / decrease / maintain) with a rationale,
//! - the learner's level,
//! - the next topic to study, with a rationale.
//!
//! The function is pure. Persisting the result and updating the stored level
//! is the caller's job. Every cutoff lives in [`HeuristicThresholds`] so it
//! can be tuned without code changes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grading::display_percentage;
use crate::levels::{Difficulty, DifficultyAdjustment, Level};

// ---------------------------------------------------------------------------
// Fixed labels
// ---------------------------------------------------------------------------

/// Topic suggested to new learners and when the catalog has no starting topic.
pub const DEFAULT_TOPIC: &str = "JavaScript Basics";

/// Sentinel suggested once every topic in the next tier is mastered.
pub const PROJECT_WORK_TOPIC: &str = "Advanced Project Work";

/// Appended to a struggling topic's title when it is recommended again.
pub const REVIEW_SUFFIX: &str = " (Review)";

pub const NEW_USER_REASONING: &str = "New user - starting with basics";
pub const DECLINING_REASONING: &str =
    "Performance declining with inconsistency - reducing difficulty to build confidence";
pub const IMPROVING_REASONING: &str =
    "Consistent improvement with high scores - ready for challenge";
pub const STRUGGLING_REASONING: &str =
    "More struggling topics than mastered - focusing on fundamentals";
pub const MASTERY_REASONING: &str =
    "Multiple topics mastered with good average - advancing difficulty";
pub const STEADY_REASONING: &str = "Steady progress - maintaining current difficulty level";
pub const REVIEW_REASON: &str = "Focusing on previously challenging topic for mastery";

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Tunable cutoffs for the heuristic. [`Default`] gives the production values.
///
/// Percent values are on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicThresholds {
    /// How many of the newest attempts are considered at all.
    pub history_window: usize,
    /// Size of the "recent" window (newest attempts).
    pub recent_window: usize,
    /// Size of the "older" window that immediately follows the recent one.
    pub older_window: usize,
    /// Points the recent average must move past the older one to count as a trend.
    pub trend_delta: f64,
    /// Recent-window variance below which performance is consistent.
    pub consistency_variance: f64,
    /// A topic is mastered when its average is strictly above this...
    pub mastery_average: f64,
    /// ...and it has at least this many attempts.
    pub mastery_min_attempts: usize,
    /// A topic is struggling when its average is strictly below this.
    pub struggling_average: f64,
    /// Overall average required to increase difficulty on an improving trend.
    pub improving_increase_average: f64,
    /// Overall average required to increase difficulty on multiple masteries.
    pub mastery_increase_average: f64,
    /// Mastered topic count required to increase difficulty on masteries.
    pub mastery_increase_topics: usize,
    /// Minimum overall average for the Advanced level.
    pub advanced_average: f64,
    /// Minimum mastered topics for the Advanced level.
    pub advanced_mastered_topics: usize,
    /// Minimum overall average for the Intermediate level.
    pub intermediate_average: f64,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            history_window: 20,
            recent_window: 5,
            older_window: 5,
            trend_delta: 5.0,
            consistency_variance: 100.0,
            mastery_average: 80.0,
            mastery_min_attempts: 2,
            struggling_average: 60.0,
            improving_increase_average: 85.0,
            mastery_increase_average: 75.0,
            mastery_increase_topics: 2,
            advanced_average: 80.0,
            advanced_mastered_topics: 3,
            intermediate_average: 60.0,
        }
    }
}

impl HeuristicThresholds {
    /// Reject configurations the heuristic cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_window == 0 || self.recent_window == 0 {
            return Err(CoreError::Validation(
                "history_window and recent_window must be at least 1".to_string(),
            ));
        }
        if self.trend_delta < 0.0 || self.consistency_variance < 0.0 {
            return Err(CoreError::Validation(
                "trend_delta and consistency_variance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One past attempt as seen by the heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAttempt {
    pub topic_name: String,
    pub percentage: f64,
}

/// One catalog entry the heuristic may suggest.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTopic {
    pub title: String,
    pub difficulty: Difficulty,
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Direction of the recent window compared with the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Decreasing,
    Flat,
}

/// Aggregates computed from the attempt window.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceStats {
    pub total_attempts: usize,
    pub average: f64,
    pub recent_average: f64,
    pub older_average: f64,
    pub trend: Trend,
    pub recent_variance: f64,
    pub is_consistent: bool,
    /// Mastered topic names, in order of most recent attempt.
    pub mastered: Vec<String>,
    /// Struggling topic names, in order of most recent attempt.
    pub struggling: Vec<String>,
}

impl PerformanceStats {
    pub fn is_improving(&self) -> bool {
        self.trend == Trend::Improving
    }

    pub fn is_decreasing(&self) -> bool {
        self.trend == Trend::Decreasing
    }
}

/// Display-friendly summary attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceAnalysis {
    pub total_attempts: usize,
    pub average_score: i64,
    pub recent_average: i64,
    pub is_improving: bool,
    pub is_consistent: bool,
    pub mastered_topics: usize,
    pub struggling_topics: usize,
}

impl From<&PerformanceStats> for PerformanceAnalysis {
    fn from(stats: &PerformanceStats) -> Self {
        Self {
            total_attempts: stats.total_attempts,
            average_score: display_percentage(stats.average),
            recent_average: display_percentage(stats.recent_average),
            is_improving: stats.is_improving(),
            is_consistent: stats.is_consistent,
            mastered_topics: stats.mastered.len(),
            struggling_topics: stats.struggling.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The heuristic's decision for one learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub recommended_topic: String,
    pub difficulty_adjustment: DifficultyAdjustment,
    pub current_level: Level,
    /// Why the difficulty adjustment was chosen.
    pub reasoning: String,
    /// Why the topic was chosen. Absent for new learners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_reason: Option<String>,
    /// Absent for new learners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_analysis: Option<PerformanceAnalysis>,
}

impl Recommendation {
    /// The fixed answer for a learner with no attempts.
    pub fn for_new_user() -> Self {
        Self {
            recommended_topic: DEFAULT_TOPIC.to_string(),
            difficulty_adjustment: DifficultyAdjustment::Maintain,
            current_level: Level::Beginner,
            reasoning: NEW_USER_REASONING.to_string(),
            recommendation_reason: None,
            performance_analysis: None,
        }
    }

    /// Whether this came from real attempt history and should be persisted.
    pub fn is_from_history(&self) -> bool {
        self.performance_analysis.is_some()
    }
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

/// Run the full heuristic.
///
/// `attempts` must be ordered newest first; only the first
/// `history_window` entries are used. `catalog` is searched in the given
/// order, so callers should pass it sorted by difficulty tier.
pub fn recommend(
    attempts: &[ScoredAttempt],
    catalog: &[CatalogTopic],
    thresholds: &HeuristicThresholds,
) -> Recommendation {
    let Some(stats) = analyse(attempts, thresholds) else {
        return Recommendation::for_new_user();
    };

    let (difficulty_adjustment, reasoning) = decide_adjustment(&stats, thresholds);
    let current_level = classify_level(&stats, thresholds);
    let (recommended_topic, recommendation_reason) =
        select_topic(&stats, current_level, catalog);

    Recommendation {
        recommended_topic,
        difficulty_adjustment,
        current_level,
        reasoning: reasoning.to_string(),
        recommendation_reason: Some(recommendation_reason),
        performance_analysis: Some(PerformanceAnalysis::from(&stats)),
    }
}

/// Compute averages, trend, consistency and per-topic classification.
///
/// Returns `None` when there are no attempts.
pub fn analyse(
    attempts: &[ScoredAttempt],
    thresholds: &HeuristicThresholds,
) -> Option<PerformanceStats> {
    let window = &attempts[..attempts.len().min(thresholds.history_window)];
    let average = mean(window.iter().map(|a| a.percentage))?;

    let recent_end = window.len().min(thresholds.recent_window);
    let recent = &window[..recent_end];
    let recent_average = mean(recent.iter().map(|a| a.percentage)).unwrap_or(average);

    let older_end = window
        .len()
        .min(recent_end.saturating_add(thresholds.older_window));
    let older_average =
        mean(window[recent_end..older_end].iter().map(|a| a.percentage)).unwrap_or(recent_average);

    let trend = if recent_average > older_average + thresholds.trend_delta {
        Trend::Improving
    } else if recent_average < older_average - thresholds.trend_delta {
        Trend::Decreasing
    } else {
        Trend::Flat
    };

    let recent_variance = recent
        .iter()
        .map(|a| (a.percentage - recent_average).powi(2))
        .sum::<f64>()
        / recent.len() as f64;

    let mut mastered = Vec::new();
    let mut struggling = Vec::new();
    for (topic, scores) in group_by_topic(window) {
        let topic_average = mean(scores.iter().copied()).unwrap_or_default();
        if topic_average > thresholds.mastery_average
            && scores.len() >= thresholds.mastery_min_attempts
        {
            mastered.push(topic.to_string());
        }
        if topic_average < thresholds.struggling_average {
            struggling.push(topic.to_string());
        }
    }

    Some(PerformanceStats {
        total_attempts: window.len(),
        average,
        recent_average,
        older_average,
        trend,
        recent_variance,
        is_consistent: recent_variance < thresholds.consistency_variance,
        mastered,
        struggling,
    })
}

/// Pick the difficulty adjustment. Rules are checked in priority order.
pub fn decide_adjustment(
    stats: &PerformanceStats,
    thresholds: &HeuristicThresholds,
) -> (DifficultyAdjustment, &'static str) {
    if stats.is_decreasing() && !stats.is_consistent {
        (DifficultyAdjustment::Decrease, DECLINING_REASONING)
    } else if stats.is_improving()
        && stats.is_consistent
        && stats.average > thresholds.improving_increase_average
    {
        (DifficultyAdjustment::Increase, IMPROVING_REASONING)
    } else if stats.struggling.len() > stats.mastered.len() {
        (DifficultyAdjustment::Decrease, STRUGGLING_REASONING)
    } else if stats.mastered.len() >= thresholds.mastery_increase_topics
        && stats.average > thresholds.mastery_increase_average
    {
        (DifficultyAdjustment::Increase, MASTERY_REASONING)
    } else {
        (DifficultyAdjustment::Maintain, STEADY_REASONING)
    }
}

pub fn classify_level(stats: &PerformanceStats, thresholds: &HeuristicThresholds) -> Level {
    if stats.average >= thresholds.advanced_average
        && stats.mastered.len() >= thresholds.advanced_mastered_topics
    {
        Level::Advanced
    } else if stats.average >= thresholds.intermediate_average
        && (!stats.mastered.is_empty() || stats.is_improving())
    {
        Level::Intermediate
    } else {
        Level::Beginner
    }
}

/// Choose the next topic: review a struggling topic first, then progress
/// past mastered ones, otherwise start at the level's tier.
pub fn select_topic(
    stats: &PerformanceStats,
    level: Level,
    catalog: &[CatalogTopic],
) -> (String, String) {
    let tier = level.tier();
    let tier_label = tier.as_str().to_lowercase();

    if let Some(topic) = stats.struggling.first() {
        return (format!("{topic}{REVIEW_SUFFIX}"), REVIEW_REASON.to_string());
    }

    if !stats.mastered.is_empty() {
        let next = catalog
            .iter()
            .find(|t| t.difficulty == tier && !stats.mastered.contains(&t.title))
            .map_or_else(|| PROJECT_WORK_TOPIC.to_string(), |t| t.title.clone());
        return (
            next,
            format!("Progressing to {tier_label} level topics based on current mastery"),
        );
    }

    let start = catalog
        .iter()
        .find(|t| t.difficulty == tier)
        .map_or_else(|| DEFAULT_TOPIC.to_string(), |t| t.title.clone());
    (
        start,
        format!(
            "Starting with {tier_label} topics appropriate for {} level",
            level.as_str().to_lowercase()
        ),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Group percentages by topic, keeping topics in order of first appearance.
fn group_by_topic(attempts: &[ScoredAttempt]) -> Vec<(&str, Vec<f64>)> {
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for attempt in attempts {
        match groups.iter_mut().find(|(t, _)| *t == attempt.topic_name) {
            Some((_, scores)) => scores.push(attempt.percentage),
            None => groups.push((attempt.topic_name.as_str(), vec![attempt.percentage])),
        }
    }
    groups
}
