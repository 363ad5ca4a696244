//! Tunable constants for team-fit scoring.
//!
//! A [`ScoringPolicy`] is a read-only snapshot: the engine reads it once per
//! scoring call and never writes back.

use serde::{Deserialize, Serialize};

/// Default lower bound of the SATURATION band
pub const DEFAULT_SATURATION_THRESHOLD: f64 = 0.75;
/// Default lower bound of the DIVERSITY band
pub const DEFAULT_DIVERSITY_THRESHOLD: f64 = 0.5;
/// The balance multiplier never leaves [MULTIPLIER_FLOOR, MULTIPLIER_CEILING]
pub const MULTIPLIER_FLOOR: f64 = 0.8;
pub const MULTIPLIER_CEILING: f64 = 1.2;

/// Scoring configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Team saturation at or above this is SATURATION
    pub saturation_threshold: f64,
    /// Team saturation at or above this (and below saturation) is DIVERSITY
    pub diversity_threshold: f64,
    /// Older single-threshold setting, consulted when `saturation_threshold` is unusable
    pub legacy_saturation_threshold: Option<f64>,

    /// Multiplier at strongly negative balance
    pub balance_penalty: f64,
    /// Multiplier at strongly positive balance
    pub balance_bonus: f64,
    /// Sigmoid steepness around balance = 0
    pub sigmoid_steepness: f64,
    /// Scale of the personality-compatibility term
    pub personality_weight: f64,

    /// Base pass threshold as a fraction of 100%
    pub pass_threshold: f64,
    pub small_team_threshold: u32,
    pub small_team_adjustment: f64,
    /// Gap ratio strictly above this triggers the severe-gap adjustment
    pub severe_gap_ratio: f64,
    pub severe_gap_adjustment: f64,
    /// Adjustments never push the pass threshold below this
    pub threshold_floor: f64,
    pub min_diversity_ratio: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            saturation_threshold: DEFAULT_SATURATION_THRESHOLD,
            diversity_threshold: DEFAULT_DIVERSITY_THRESHOLD,
            legacy_saturation_threshold: None,
            balance_penalty: 0.9,
            balance_bonus: 1.1,
            sigmoid_steepness: 10.0,
            personality_weight: 0.1,
            pass_threshold: 0.6,
            small_team_threshold: 5,
            small_team_adjustment: 0.1,
            severe_gap_ratio: 0.5,
            severe_gap_adjustment: 0.1,
            threshold_floor: 0.3,
            min_diversity_ratio: 0.3,
        }
    }
}

/// Classification band boundaries after fallback resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub saturation: f64,
    pub diversity: f64,
    /// Set when any configured value was replaced by a default
    #[serde(skip)]
    pub fell_back: bool,
}

fn usable_threshold(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= 1.0
}

impl ScoringPolicy {
    /// Resolve the classification thresholds.
    ///
    /// Each threshold must lie in (0, 1]. An unusable saturation threshold
    /// falls back to the legacy field, then to 0.75; an unusable diversity
    /// threshold falls back to 0.5. If the resolved pair is inverted
    /// (diversity not below saturation) both revert to their defaults.
    pub fn thresholds(&self) -> ClassificationThresholds {
        let mut fell_back = false;

        let saturation = if usable_threshold(self.saturation_threshold) {
            self.saturation_threshold
        } else {
            fell_back = true;
            match self.legacy_saturation_threshold {
                Some(legacy) if usable_threshold(legacy) => legacy,
                _ => DEFAULT_SATURATION_THRESHOLD,
            }
        };

        let diversity = if usable_threshold(self.diversity_threshold) {
            self.diversity_threshold
        } else {
            fell_back = true;
            DEFAULT_DIVERSITY_THRESHOLD
        };

        if diversity >= saturation {
            return ClassificationThresholds {
                saturation: DEFAULT_SATURATION_THRESHOLD,
                diversity: DEFAULT_DIVERSITY_THRESHOLD,
                fell_back: true,
            };
        }

        ClassificationThresholds {
            saturation,
            diversity,
            fell_back,
        }
    }
}
