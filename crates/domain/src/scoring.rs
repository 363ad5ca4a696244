//! Scoring outputs: per-competency breakdowns and the final team-fit result.

use crate::competency::BigFiveTrait;
use crate::identifiers::{CompetencyId, IndicatorId};
use crate::policy::ClassificationThresholds;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a competency relates to the team's existing strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitClassification {
    /// The team is under-represented in this competency
    Gap,
    /// Mid-range team coverage
    Diversity,
    /// The team is already strong here
    Saturation,
}

impl fmt::Display for FitClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gap => "GAP",
            Self::Diversity => "DIVERSITY",
            Self::Saturation => "SATURATION",
        })
    }
}

/// Answer totals for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub sum: f64,
    pub answered: usize,
    pub percentage: f64,
}

/// Aggregated score for one competency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyScore {
    pub competency_id: CompetencyId,
    pub name: String,
    /// Sum of normalized answer values
    pub sum: f64,
    pub answered: usize,
    /// 100 * sum / answered, always in [0, 100]
    pub percentage: f64,
    /// Aggregation weight after taxonomy boosts
    pub weight: f64,
    /// Big Five trait the competency maps to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_five: Option<BigFiveTrait>,
    pub indicators: IndexMap<IndicatorId, IndicatorScore>,
    /// Filled once team-fit classification has run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<FitClassification>,
    /// Ratio the classification compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_ratio: Option<f64>,
}

/// Team-fit metrics derived from the classifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFitMetrics {
    pub gap_count: usize,
    pub diversity_count: usize,
    pub saturation_count: usize,
    pub gap_ratio: f64,
    pub diversity_ratio: f64,
    pub saturation_ratio: f64,
    /// diversity_ratio - saturation_ratio
    pub balance: f64,
    pub multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_compatibility: Option<f64>,
    /// True when a team profile was available for comparison
    pub team_profile_used: bool,
    pub thresholds: ClassificationThresholds,
}

impl TeamFitMetrics {
    pub fn classified_count(&self) -> usize {
        self.gap_count + self.diversity_count + self.saturation_count
    }
}

/// Final outcome of scoring one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Adjusted score as a fraction, percentage / 100
    pub overall_score: f64,
    /// Weighted percentage after the team-fit multiplier, in [0, 100]
    pub percentage: f64,
    /// Weighted percentage before the multiplier
    pub raw_percentage: f64,
    pub passed: bool,
    /// Pass threshold after team-size and gap adjustments
    pub pass_threshold: f64,
    pub competency_scores: Vec<CompetencyScore>,
    pub team_fit: TeamFitMetrics,
    pub scored_at: DateTime<Utc>,
}
