//! Team balance multiplier and personality compatibility.

use super::classifier::ClassificationCounts;
use assessment_domain::competency::BigFiveTrait;
use assessment_domain::policy::{ScoringPolicy, MULTIPLIER_CEILING, MULTIPLIER_FLOOR};
use assessment_domain::scoring::CompetencyScore;
use assessment_domain::team::PersonalityProfile;
use std::collections::BTreeMap;
use tracing::debug;

/// Personality scores are on a 0-100 scale
const TRAIT_SCALE: f64 = 100.0;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone, Copy)]
pub struct BalanceMultiplierCalculator {
    penalty: f64,
    bonus: f64,
    steepness: f64,
    personality_weight: f64,
}

impl BalanceMultiplierCalculator {
    pub fn from_policy(policy: &ScoringPolicy) -> Self {
        Self {
            penalty: policy.balance_penalty,
            bonus: policy.balance_bonus,
            steepness: policy.sigmoid_steepness,
            personality_weight: policy.personality_weight,
        }
    }

    /// Diversity ratio minus saturation ratio, in [-1, 1]
    pub fn balance(counts: &ClassificationCounts) -> f64 {
        counts.diversity_ratio() - counts.saturation_ratio()
    }

    /// Score multiplier for a balance value, always within [0.8, 1.2].
    ///
    /// Rises from `penalty` to `bonus` along a sigmoid centred on zero
    /// balance. A known personality compatibility shifts it by
    /// `(compatibility - 0.5) * personality_weight` before clamping.
    pub fn multiplier(&self, balance: f64, compatibility: Option<f64>) -> f64 {
        let base = self.penalty + (self.bonus - self.penalty) * sigmoid(self.steepness * balance);
        let personality = compatibility
            .map(|c| (c.clamp(0.0, 1.0) - 0.5) * self.personality_weight)
            .unwrap_or(0.0);
        let multiplier = base + personality;

        debug!(balance, base, personality, "Computed balance multiplier");

        if multiplier.is_nan() {
            return 1.0;
        }
        multiplier.clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEILING)
    }

    /// Similarity in [0, 1] between two Big Five profiles.
    ///
    /// Compares only traits present in both, as one minus the Euclidean
    /// distance normalized by its maximum. `None` when no trait is shared.
    pub fn personality_compatibility(
        candidate: &PersonalityProfile,
        team: &PersonalityProfile,
    ) -> Option<f64> {
        let differences: Vec<f64> = candidate
            .iter()
            .filter_map(|(t, c)| {
                let m = team.get(t)?;
                (c.is_finite() && m.is_finite())
                    .then(|| c.clamp(0.0, TRAIT_SCALE) - m.clamp(0.0, TRAIT_SCALE))
            })
            .collect();

        if differences.is_empty() {
            return None;
        }

        let distance = differences.iter().map(|d| d * d).sum::<f64>().sqrt();
        let max_distance = TRAIT_SCALE * (differences.len() as f64).sqrt();
        Some((1.0 - distance / max_distance).clamp(0.0, 1.0))
    }
}

/// Candidate Big Five profile from competencies that map to a trait.
///
/// Each trait gets the mean percentage of its competencies.
pub fn derive_candidate_personality(scores: &[CompetencyScore]) -> PersonalityProfile {
    let mut sums: BTreeMap<BigFiveTrait, (f64, usize)> = BTreeMap::new();
    for score in scores {
        if let Some(big_five) = score.big_five {
            let entry = sums.entry(big_five).or_insert((0.0, 0));
            entry.0 += score.percentage;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(t, (sum, n))| (t, sum / n as f64))
        .collect()
}
