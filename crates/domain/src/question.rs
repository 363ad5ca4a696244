//! Question bank entries and difficulty levels.

use crate::identifiers::{IndicatorId, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tag marking a question as usable in any context
pub const GENERAL_TAG: &str = "GENERAL";

/// Ordered difficulty classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Foundational,
    Intermediate,
    Advanced,
    Expert,
    Specialized,
}

impl DifficultyLevel {
    /// All levels in ascending order
    pub const ALL: [DifficultyLevel; 5] = [
        DifficultyLevel::Foundational,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
        DifficultyLevel::Expert,
        DifficultyLevel::Specialized,
    ];

    /// The mid-range bands used for graduated selection
    pub const GRADUATED_BANDS: [DifficultyLevel; 3] = [
        DifficultyLevel::Foundational,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    /// Integer rank of this level, starting at 0
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Foundational => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
            Self::Expert => 3,
            Self::Specialized => 4,
        }
    }

    /// Absolute difference between two levels' ranks
    pub fn distance(self, other: DifficultyLevel) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foundational => "FOUNDATIONAL",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
            Self::Expert => "EXPERT",
            Self::Specialized => "SPECIALIZED",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question in the bank.
///
/// Questions are created and retired by the catalog process; the engine only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub indicator_id: IndicatorId,
    pub difficulty: DifficultyLevel,
    pub active: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Question {
    pub fn new(indicator_id: IndicatorId, difficulty: DifficultyLevel) -> Self {
        Self {
            id: QuestionId::new(),
            indicator_id,
            difficulty,
            active: true,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when the question carries no tags or is tagged GENERAL
    pub fn is_context_neutral(&self) -> bool {
        self.tags.is_empty() || self.tags.contains(GENERAL_TAG)
    }
}
