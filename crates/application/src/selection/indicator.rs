//! Selection of questions for a single behavioral indicator.

use super::filters::{is_context_neutral, EligibilityFilter};
use super::ranking::rank_by_difficulty;
use assessment_domain::identifiers::{IndicatorId, QuestionId};
use assessment_domain::ports::{EligibilityOracle, QuestionCatalog};
use assessment_domain::question::Question;
use assessment_domain::selection::SelectionCriteria;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Picks eligible, non-excluded questions for one indicator
#[derive(Clone, Copy)]
pub struct IndicatorSelector<'a> {
    catalog: &'a dyn QuestionCatalog,
    eligibility: EligibilityFilter<'a>,
}

impl<'a> IndicatorSelector<'a> {
    pub fn new(catalog: &'a dyn QuestionCatalog, oracle: &'a dyn EligibilityOracle) -> Self {
        Self {
            catalog,
            eligibility: EligibilityFilter::new(oracle),
        }
    }

    /// Every question the indicator can currently contribute.
    ///
    /// Drops ineligible and excluded questions, context-specific ones when a
    /// universal baseline is requested, and any id the catalog repeats.
    pub(crate) fn eligible_pool(
        &self,
        indicator_id: &IndicatorId,
        criteria: &SelectionCriteria,
        exclude: &HashSet<QuestionId>,
    ) -> Vec<Question> {
        let fetched = self.catalog.active_questions_for_indicator(indicator_id);
        let fetched_count = fetched.len();

        let mut seen = HashSet::with_capacity(fetched_count);
        let pool: Vec<Question> = fetched
            .into_iter()
            .filter(|q| self.eligibility.is_eligible(q))
            .filter(|q| !criteria.universal_baseline || is_context_neutral(q))
            .filter(|q| !exclude.contains(&q.id))
            .filter(|q| seen.insert(q.id))
            .collect();

        if pool.is_empty() {
            warn!(%indicator_id, fetched = fetched_count, "No eligible questions for indicator");
        } else {
            debug!(%indicator_id, fetched = fetched_count, eligible = pool.len(), "Built eligible pool");
        }

        pool
    }

    /// Select up to `max_count` questions for the indicator.
    ///
    /// Returns fewer when the eligible pool is smaller, and an empty list when
    /// nothing qualifies; neither case is an error.
    pub fn select<R: Rng + ?Sized>(
        &self,
        indicator_id: &IndicatorId,
        max_count: usize,
        criteria: &SelectionCriteria,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Vec<QuestionId> {
        if max_count == 0 {
            return Vec::new();
        }

        let pool = self.eligible_pool(indicator_id, criteria, exclude);
        rank_by_difficulty(pool, criteria.preferred_difficulty, rng)
            .into_iter()
            .take(max_count)
            .map(|q| q.id)
            .collect()
    }

    /// Select using graduated bands when the criteria ask for it
    pub fn draw<R: Rng + ?Sized>(
        &self,
        indicator_id: &IndicatorId,
        count: usize,
        criteria: &SelectionCriteria,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Vec<QuestionId> {
        if criteria.graduated {
            self.select_graduated(indicator_id, count, criteria, exclude, rng)
        } else {
            self.select(indicator_id, count, criteria, exclude, rng)
        }
    }
}
