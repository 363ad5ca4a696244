//! Graduated difficulty selection.
//!
//! Short assessments drawn purely by preferred difficulty tend to cluster at
//! one level. For quotas of three or more, the quota is split evenly over the
//! FOUNDATIONAL, INTERMEDIATE and ADVANCED bands instead; a band that cannot
//! fill its share hands the shortfall to a fallback pass over the whole pool.

use super::indicator::IndicatorSelector;
use super::ranking::rank_by_difficulty;
use assessment_domain::identifiers::{IndicatorId, QuestionId};
use assessment_domain::question::{DifficultyLevel, Question};
use assessment_domain::selection::SelectionCriteria;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Quotas below this skip banding
pub const GRADUATED_MIN_QUOTA: usize = 3;

/// Split a quota across the graduated bands, remainder to the earlier bands
pub fn band_quotas(quota: usize) -> [(DifficultyLevel, usize); 3] {
    let bands = DifficultyLevel::GRADUATED_BANDS;
    let per_band = quota / bands.len();
    let remainder = quota % bands.len();
    [0, 1, 2].map(|i| (bands[i], per_band + usize::from(i < remainder)))
}

impl<'a> IndicatorSelector<'a> {
    /// Select `quota` questions spread over the graduated bands.
    ///
    /// Output is grouped band by band in ascending difficulty, followed by any
    /// fallback picks.
    pub fn select_graduated<R: Rng + ?Sized>(
        &self,
        indicator_id: &IndicatorId,
        quota: usize,
        criteria: &SelectionCriteria,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Vec<QuestionId> {
        if quota < GRADUATED_MIN_QUOTA {
            return self.select(indicator_id, quota, criteria, exclude, rng);
        }

        let pool = self.eligible_pool(indicator_id, criteria, exclude);
        let mut selected: Vec<QuestionId> = Vec::with_capacity(quota);
        let mut taken: HashSet<QuestionId> = HashSet::with_capacity(quota);
        let mut unmet = 0usize;

        for (band, band_quota) in band_quotas(quota) {
            let band_pool: Vec<Question> = pool
                .iter()
                .filter(|q| q.difficulty == band)
                .cloned()
                .collect();
            let picked: Vec<QuestionId> = rank_by_difficulty(band_pool, Some(band), rng)
                .into_iter()
                .take(band_quota)
                .map(|q| q.id)
                .collect();

            unmet += band_quota - picked.len();
            taken.extend(picked.iter().copied());
            selected.extend(picked);
        }

        if unmet > 0 {
            let remaining: Vec<Question> = pool
                .into_iter()
                .filter(|q| !taken.contains(&q.id))
                .collect();
            let fallback: Vec<QuestionId> =
                rank_by_difficulty(remaining, criteria.preferred_difficulty, rng)
                    .into_iter()
                    .take(unmet)
                    .map(|q| q.id)
                    .collect();
            debug!(
                %indicator_id,
                unmet,
                filled = fallback.len(),
                "Graduated bands short, drew from full pool"
            );
            selected.extend(fallback);
        }

        selected
    }
}
