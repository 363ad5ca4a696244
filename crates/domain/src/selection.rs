//! Question selection request types.

use crate::errors::SelectionError;
use crate::identifiers::IndicatorId;
use crate::question::DifficultyLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How a total question budget is spread across indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionStrategy {
    /// Round-robin, one question per indicator per round
    #[default]
    Waterfall,
    /// Proportional to indicator weight, minimum one each
    Weighted,
    /// Fill indicators in list order up to the per-indicator quota
    PriorityFirst,
}

impl DistributionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waterfall => "WATERFALL",
            Self::Weighted => "WEIGHTED",
            Self::PriorityFirst => "PRIORITY_FIRST",
        }
    }
}

impl fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionStrategy {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "WATERFALL" => Ok(Self::Waterfall),
            "WEIGHTED" => Ok(Self::Weighted),
            "PRIORITY_FIRST" => Ok(Self::PriorityFirst),
            _ => Err(SelectionError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Per-call selection preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Rank questions closest to this level first; shuffle when absent
    pub preferred_difficulty: Option<DifficultyLevel>,
    /// Restrict the pool to context-neutral questions
    #[serde(default)]
    pub universal_baseline: bool,
    /// Spread each indicator's share across the graduated bands
    #[serde(default)]
    pub graduated: bool,
}

impl SelectionCriteria {
    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.preferred_difficulty = Some(difficulty);
        self
    }

    pub fn universal_baseline(mut self) -> Self {
        self.universal_baseline = true;
        self
    }

    pub fn graduated(mut self) -> Self {
        self.graduated = true;
        self
    }
}

/// A request to spread a budget across several indicators
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRequest {
    /// Indicators in priority order
    pub indicator_ids: Vec<IndicatorId>,
    pub total_budget: usize,
    /// Cap per indicator for WATERFALL and PRIORITY_FIRST; `None` means uncapped
    pub per_indicator_quota: Option<usize>,
    pub strategy: DistributionStrategy,
    /// Relative weights, read by WEIGHTED only; missing entries count as zero
    pub weights: HashMap<IndicatorId, f64>,
    pub criteria: SelectionCriteria,
}

impl DistributionRequest {
    pub fn new(
        indicator_ids: Vec<IndicatorId>,
        total_budget: usize,
        strategy: DistributionStrategy,
    ) -> Self {
        Self {
            indicator_ids,
            total_budget,
            per_indicator_quota: None,
            strategy,
            weights: HashMap::new(),
            criteria: SelectionCriteria::default(),
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.per_indicator_quota = Some(quota);
        self
    }

    pub fn with_weights(mut self, weights: HashMap<IndicatorId, f64>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_criteria(mut self, criteria: SelectionCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}
