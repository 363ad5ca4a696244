//! Pass/fail decision with team-aware threshold adjustments.

use super::classifier::ClassificationCounts;
use assessment_domain::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of the pass decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassDecision {
    pub passed: bool,
    /// Threshold actually applied, as a fraction
    pub threshold: f64,
    pub meets_threshold: bool,
    pub meets_diversity: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PassDecisionEngine {
    base_threshold: f64,
    small_team_threshold: u32,
    small_team_adjustment: f64,
    severe_gap_ratio: f64,
    severe_gap_adjustment: f64,
    floor: f64,
    min_diversity_ratio: f64,
}

impl PassDecisionEngine {
    pub fn from_policy(policy: &ScoringPolicy) -> Self {
        Self {
            base_threshold: policy.pass_threshold,
            small_team_threshold: policy.small_team_threshold,
            small_team_adjustment: policy.small_team_adjustment,
            severe_gap_ratio: policy.severe_gap_ratio,
            severe_gap_adjustment: policy.severe_gap_adjustment,
            floor: policy.threshold_floor,
            min_diversity_ratio: policy.min_diversity_ratio,
        }
    }

    /// Base threshold lowered for small teams and severe gaps, never below the floor.
    ///
    /// `member_count` is `None` when no team profile is known; the small-team
    /// adjustment then does not apply.
    pub fn adjusted_threshold(&self, member_count: Option<u32>, gap_ratio: f64) -> f64 {
        let mut threshold = self.base_threshold;
        if member_count.map_or(false, |n| n < self.small_team_threshold) {
            threshold -= self.small_team_adjustment;
        }
        if gap_ratio > self.severe_gap_ratio {
            threshold -= self.severe_gap_adjustment;
        }
        threshold.max(self.floor)
    }

    /// Both the score and the diversity condition must hold; a session with
    /// nothing classified always fails.
    pub fn decide(
        &self,
        percentage: f64,
        counts: &ClassificationCounts,
        member_count: Option<u32>,
    ) -> PassDecision {
        let threshold = self.adjusted_threshold(member_count, counts.gap_ratio());
        let meets_threshold = percentage / 100.0 >= threshold;
        let meets_diversity = counts.diversity_ratio() >= self.min_diversity_ratio;
        let passed = counts.total() > 0 && meets_threshold && meets_diversity;

        debug!(
            threshold,
            meets_threshold,
            meets_diversity,
            classified = counts.total(),
            passed,
            "Pass decision"
        );

        PassDecision {
            passed,
            threshold,
            meets_threshold,
            meets_diversity,
        }
    }
}
