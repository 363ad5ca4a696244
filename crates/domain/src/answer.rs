//! Recorded answers to assessment questions.

use crate::identifiers::{AnswerId, QuestionId};
use serde::{Deserialize, Serialize};

/// Lowest point on the Likert scale
pub const LIKERT_MIN: i32 = 1;
/// Highest point on the Likert scale
pub const LIKERT_MAX: i32 = 5;

/// Declared kind of an answer's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// Ordinal 1-5 agreement scale
    Likert,
    /// Correct / incorrect
    Binary,
    /// Pre-scored value in [0, 1]
    Continuous,
}

/// An answer produced once per question per session.
///
/// The raw value slots are all optional: upstream capture can leave the
/// declared slot empty and fill a different one, and normalisation falls back
/// to whichever slot is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: Option<QuestionId>,
    pub kind: AnswerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal_value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_value: Option<f64>,
    #[serde(default)]
    pub skipped: bool,
}

impl Answer {
    fn empty(question_id: QuestionId, kind: AnswerKind) -> Self {
        Self {
            id: AnswerId::new(),
            question_id: Some(question_id),
            kind,
            ordinal_value: None,
            correct: None,
            continuous_value: None,
            skipped: false,
        }
    }

    pub fn likert(question_id: QuestionId, value: i32) -> Self {
        Self {
            ordinal_value: Some(value),
            ..Self::empty(question_id, AnswerKind::Likert)
        }
    }

    pub fn binary(question_id: QuestionId, correct: bool) -> Self {
        Self {
            correct: Some(correct),
            ..Self::empty(question_id, AnswerKind::Binary)
        }
    }

    pub fn continuous(question_id: QuestionId, value: f64) -> Self {
        Self {
            continuous_value: Some(value),
            ..Self::empty(question_id, AnswerKind::Continuous)
        }
    }

    pub fn skipped(question_id: QuestionId, kind: AnswerKind) -> Self {
        Self {
            skipped: true,
            ..Self::empty(question_id, kind)
        }
    }

    /// True when any raw value slot is filled
    pub fn has_value(&self) -> bool {
        self.ordinal_value.is_some()
            || self.correct.is_some()
            || self.continuous_value.map_or(false, |v| !v.is_nan())
    }

    /// Whether this answer can contribute to a competency score
    pub fn is_scoreable(&self) -> bool {
        !self.skipped && self.question_id.is_some() && self.has_value()
    }
}
