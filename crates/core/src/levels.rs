//! Learner levels, topic difficulty tiers, and related labels.
//!
//! These values are stored as TEXT in PostgreSQL (guarded by CHECK
//! constraints) and round-trip through [`as_str`](Level::as_str) /
//! [`FromStr`]. The labels must match the constraints in
//! `20261019000001_create_learning_schema.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// A learner's nominal level. Only the recommendation routine changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// The difficulty tier a learner at this level should work on.
    pub fn tier(self) -> Difficulty {
        match self {
            Self::Beginner => Difficulty::Easy,
            Self::Intermediate => Difficulty::Medium,
            Self::Advanced => Difficulty::Hard,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Self::Beginner),
            "Intermediate" => Ok(Self::Intermediate),
            "Advanced" => Ok(Self::Advanced),
            other => Err(CoreError::Validation(format!("Unknown level '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty label of a topic or question. Ordered `Easy < Medium < Hard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            other => Err(CoreError::Validation(format!(
                "Unknown difficulty '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// DifficultyAdjustment
// ---------------------------------------------------------------------------

/// Direction the recommendation routine suggests moving the difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyAdjustment {
    Increase,
    Decrease,
    Maintain,
}

impl DifficultyAdjustment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "Increase",
            Self::Decrease => "Decrease",
            Self::Maintain => "Maintain",
        }
    }
}

impl fmt::Display for DifficultyAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyAdjustment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Increase" => Ok(Self::Increase),
            "Decrease" => Ok(Self::Decrease),
            "Maintain" => Ok(Self::Maintain),
            other => Err(CoreError::Validation(format!(
                "Unknown difficulty adjustment '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// OptionLetter
// ---------------------------------------------------------------------------

/// One of the four answer slots of a question, stored as a single lowercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `a`-`d` in either case, ignoring surrounding whitespace.
impl FromStr for OptionLetter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            _ => Err(CoreError::Validation(format!(
                "Answer option must be one of a, b, c, d, got '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

// Lets `sqlx::FromRow` decode TEXT columns via `#[sqlx(try_from = "String")]`.

impl TryFrom<String> for Level {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Difficulty {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DifficultyAdjustment {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for OptionLetter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
