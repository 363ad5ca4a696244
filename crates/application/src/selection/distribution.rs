//! Spreading a question budget across several indicators.

use super::indicator::IndicatorSelector;
use crate::ApplicationResult;
use assessment_domain::errors::SelectionError;
use assessment_domain::identifiers::{IndicatorId, QuestionId};
use assessment_domain::selection::{DistributionRequest, DistributionStrategy, SelectionCriteria};
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

/// Runs a [`DistributionRequest`] against one indicator selector.
///
/// Every strategy shares a running exclusion set seeded from the caller's
/// exclusions, so no question id is emitted twice within a plan.
#[derive(Clone, Copy)]
pub struct DistributionPlanner<'a> {
    selector: IndicatorSelector<'a>,
}

impl<'a> DistributionPlanner<'a> {
    pub fn new(selector: IndicatorSelector<'a>) -> Self {
        Self { selector }
    }

    pub fn plan<R: Rng + ?Sized>(
        &self,
        request: &DistributionRequest,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> ApplicationResult<Vec<QuestionId>> {
        if request.per_indicator_quota == Some(0) {
            return Err(SelectionError::ZeroQuota.into());
        }

        let mut unique = HashSet::with_capacity(request.indicator_ids.len());
        let indicators: Vec<IndicatorId> = request
            .indicator_ids
            .iter()
            .copied()
            .filter(|id| unique.insert(*id))
            .collect();

        if indicators.is_empty() || request.total_budget == 0 {
            debug!(
                indicators = indicators.len(),
                budget = request.total_budget,
                "Nothing to distribute"
            );
            return Ok(Vec::new());
        }

        let mut plan = Plan {
            selector: self.selector,
            criteria: request.criteria,
            budget: request.total_budget,
            seen: exclude.clone(),
            selected: Vec::with_capacity(request.total_budget),
        };

        match request.strategy {
            DistributionStrategy::Waterfall => {
                plan.waterfall(&indicators, request.per_indicator_quota, rng)
            }
            DistributionStrategy::PriorityFirst => {
                plan.priority_first(&indicators, request.per_indicator_quota, rng)
            }
            DistributionStrategy::Weighted => {
                let weighted = positive_weights(&indicators, request)?;
                plan.weighted(&weighted, rng)
            }
        }

        info!(
            strategy = %request.strategy,
            indicators = indicators.len(),
            budget = request.total_budget,
            selected = plan.selected.len(),
            "Distribution planned"
        );

        Ok(plan.selected)
    }
}

/// Mutable state of one planning run
struct Plan<'a> {
    selector: IndicatorSelector<'a>,
    criteria: SelectionCriteria,
    budget: usize,
    seen: HashSet<QuestionId>,
    selected: Vec<QuestionId>,
}

impl<'a> Plan<'a> {
    fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.selected.len())
    }

    /// Draw up to `count` for one indicator and take whatever comes back
    fn take<R: Rng + ?Sized>(&mut self, indicator: &IndicatorId, count: usize, rng: &mut R) -> usize {
        let count = count.min(self.remaining());
        if count == 0 {
            return 0;
        }
        let picked = self.selector.draw(indicator, count, &self.criteria, &self.seen, rng);
        let mut taken = 0;
        for id in picked {
            if self.seen.insert(id) {
                self.selected.push(id);
                taken += 1;
            }
        }
        taken
    }

    fn waterfall<R: Rng + ?Sized>(&mut self, indicators: &[IndicatorId], quota: Option<usize>, rng: &mut R) {
        let cap = quota.unwrap_or(self.budget).min(self.budget);
        let mut counts = vec![0usize; indicators.len()];
        let rounds = self.round_robin(indicators, cap, &mut counts, rng);

        if self.criteria.graduated {
            self.redraw_graduated(indicators, cap, &mut counts, rng);
        }

        debug!(rounds, cap, shares = ?counts, "Waterfall rounds complete");
    }

    /// Round-robin over fully ranked queues, one pick per indicator per round.
    ///
    /// `counts` carries what each indicator already holds; none passes `cap`.
    fn round_robin<R: Rng + ?Sized>(
        &mut self,
        indicators: &[IndicatorId],
        cap: usize,
        counts: &mut [usize],
        rng: &mut R,
    ) -> usize {
        let ranked = SelectionCriteria {
            graduated: false,
            ..self.criteria
        };
        let mut queues: Vec<VecDeque<QuestionId>> = indicators
            .iter()
            .map(|id| {
                self.selector
                    .select(id, self.budget, &ranked, &self.seen, rng)
                    .into_iter()
                    .collect()
            })
            .collect();

        let mut rounds = 0usize;
        while self.remaining() > 0 {
            let mut progressed = false;

            for (queue, count) in queues.iter_mut().zip(counts.iter_mut()) {
                if self.selected.len() >= self.budget {
                    break;
                }
                if *count >= cap {
                    continue;
                }
                while let Some(id) = queue.pop_front() {
                    if self.seen.insert(id) {
                        self.selected.push(id);
                        *count += 1;
                        progressed = true;
                        break;
                    }
                }
            }

            if !progressed {
                break;
            }
            rounds += 1;
        }
        rounds
    }

    /// Replace each indicator's round-robin picks with a graduated draw of the
    /// same size, then top up any share the redraw could not fill.
    fn redraw_graduated<R: Rng + ?Sized>(
        &mut self,
        indicators: &[IndicatorId],
        cap: usize,
        counts: &mut [usize],
        rng: &mut R,
    ) {
        let shares = counts.to_vec();
        for id in self.selected.drain(..) {
            self.seen.remove(&id);
        }

        for ((indicator, share), count) in indicators.iter().zip(&shares).zip(counts.iter_mut()) {
            *count = self.take(indicator, *share, rng);
        }

        if counts.iter().zip(&shares).any(|(count, share)| count < share) {
            debug!(shares = ?shares, drawn = ?counts, "Graduated shares short, topping up");
            self.round_robin(indicators, cap, counts, rng);
        }
    }

    fn priority_first<R: Rng + ?Sized>(&mut self, indicators: &[IndicatorId], quota: Option<usize>, rng: &mut R) {
        let quota = quota.unwrap_or(self.budget);
        for indicator in indicators {
            if self.remaining() == 0 {
                break;
            }
            self.take(indicator, quota, rng);
        }
    }

    fn weighted<R: Rng + ?Sized>(&mut self, weighted: &[(IndicatorId, f64)], rng: &mut R) {
        if weighted.is_empty() {
            return;
        }

        let allocation = allocate_weighted(self.budget, weighted);
        let mut shortfall = 0usize;
        for ((indicator, _), &count) in weighted.iter().zip(&allocation) {
            shortfall += count - self.take(indicator, count, rng);
        }

        if shortfall == 0 {
            return;
        }

        warn!(shortfall, "Weighted allocation not met, offering unmet budget to other indicators");

        // Highest weight first
        let before = self.selected.len();
        for (indicator, _) in weighted {
            if self.remaining() == 0 || self.selected.len() - before >= shortfall {
                break;
            }
            let want = shortfall - (self.selected.len() - before);
            let refill = self.selector.draw(
                indicator,
                want.min(self.remaining()),
                &self.criteria,
                &self.seen,
                rng,
            );
            for id in refill {
                if self.seen.insert(id) {
                    self.selected.push(id);
                }
            }
        }
        debug!(
            shortfall,
            refilled = self.selected.len() - before,
            "Weighted shortfall refilled"
        );
    }
}

/// Weights of the listed indicators, positive entries only, heaviest first.
///
/// Non-finite weights are rejected. Negative weights count toward the total
/// but never receive an allocation; a total of zero or less plans nothing.
fn positive_weights(
    indicators: &[IndicatorId],
    request: &DistributionRequest,
) -> ApplicationResult<Vec<(IndicatorId, f64)>> {
    let mut total = 0.0;
    let mut weighted = Vec::with_capacity(indicators.len());

    for id in indicators {
        let weight = request.weights.get(id).copied().unwrap_or(0.0);
        if !weight.is_finite() {
            return Err(SelectionError::InvalidWeight {
                indicator: *id,
                weight,
            }
            .into());
        }
        total += weight;
        if weight > 0.0 {
            weighted.push((*id, weight));
        }
    }

    if total <= 0.0 || weighted.is_empty() {
        warn!(total, "Weighted distribution has no positive total weight");
        return Ok(Vec::new());
    }

    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(weighted)
}

/// Split `budget` proportionally over `weights` (positive, heaviest first).
///
/// Each indicator gets `floor(budget * w / total)`, raised to at least one.
/// If the minimums overshoot, the largest shares above one shrink first; when
/// every share is one, the lightest indicators drop to zero. Leftover budget
/// is handed out one at a time starting from the heaviest indicator.
pub fn allocate_weighted(budget: usize, weights: &[(IndicatorId, f64)]) -> Vec<usize> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut allocation: Vec<usize> = weights
        .iter()
        .map(|(_, w)| ((budget as f64) * w / total).floor().max(1.0) as usize)
        .collect();

    let mut allocated: usize = allocation.iter().sum();
    while allocated > budget {
        let largest = allocation
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 1)
            .max_by_key(|(i, n)| (**n, *i))
            .map(|(i, _)| i);
        let shrink = match largest {
            Some(i) => Some(i),
            None => allocation.iter().rposition(|n| *n > 0),
        };

        match shrink {
            Some(i) => allocation[i] -= 1,
            None => break,
        }
        allocated -= 1;
    }

    let mut cursor = 0;
    while allocated < budget {
        allocation[cursor % weights.len()] += 1;
        allocated += 1;
        cursor += 1;
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AllEligible, InMemoryQuestionBank};
    use assessment_domain::ports::QuestionCatalog;
    use assessment_domain::question::{DifficultyLevel, Question};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn bank(indicators: &[(IndicatorId, usize)]) -> InMemoryQuestionBank {
        let questions = indicators
            .iter()
            .flat_map(|(id, n)| {
                (0..*n).map(move |i| Question::new(*id, DifficultyLevel::ALL[i % 5]))
            })
            .collect();
        InMemoryQuestionBank::new(questions, vec![])
    }

    fn counts(bank: &InMemoryQuestionBank, ids: &[QuestionId]) -> HashMap<IndicatorId, usize> {
        let mut counts = HashMap::new();
        for id in ids {
            let q = bank.questions().iter().find(|q| q.id == *id).unwrap();
            *counts.entry(q.indicator_id).or_insert(0) += 1;
        }
        counts
    }

    fn run(bank: &InMemoryQuestionBank, request: &DistributionRequest) -> ApplicationResult<Vec<QuestionId>> {
        let planner = DistributionPlanner::new(IndicatorSelector::new(bank, &AllEligible));
        planner.plan(request, &HashSet::new(), &mut StdRng::seed_from_u64(17))
    }

    #[test]
    fn test_allocate_weighted_proportional() {
        let (a, b) = (IndicatorId::new(), IndicatorId::new());
        assert_eq!(allocate_weighted(10, &[(a, 3.0), (b, 1.0)]), vec![8, 2]);
        assert_eq!(allocate_weighted(9, &[(a, 1.0), (b, 1.0)]), vec![5, 4]);
    }

    #[test]
    fn test_allocate_weighted_minimum_one() {
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let weights = [(ids[0], 100.0), (ids[1], 1.0), (ids[2], 1.0)];
        let allocation = allocate_weighted(5, &weights);
        assert_eq!(allocation, vec![3, 1, 1]);
        assert_eq!(allocation.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_allocate_weighted_budget_below_indicator_count() {
        let ids: Vec<_> = (0..4).map(|_| IndicatorId::new()).collect();
        let weights: Vec<_> = ids.iter().zip([4.0, 3.0, 2.0, 1.0]).map(|(id, w)| (*id, w)).collect();
        assert_eq!(allocate_weighted(2, &weights), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_plan() {
        let a = IndicatorId::new();
        let bank = bank(&[(a, 5)]);

        let empty = DistributionRequest::new(vec![], 10, DistributionStrategy::Waterfall);
        assert_eq!(run(&bank, &empty), Ok(vec![]));

        let zero_budget = DistributionRequest::new(vec![a], 0, DistributionStrategy::PriorityFirst);
        assert_eq!(run(&bank, &zero_budget), Ok(vec![]));
    }

    #[test]
    fn test_zero_quota_rejected() {
        let a = IndicatorId::new();
        let bank = bank(&[(a, 5)]);
        let request = DistributionRequest::new(vec![a], 3, DistributionStrategy::Waterfall).with_quota(0);
        let err = run(&bank, &request).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_waterfall_balances_indicators() {
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let bank = bank(&[(ids[0], 10), (ids[1], 10), (ids[2], 10)]);
        let request = DistributionRequest::new(ids.clone(), 8, DistributionStrategy::Waterfall);

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 8);
        assert_eq!(counts[&ids[0]], 3);
        assert_eq!(counts[&ids[1]], 3);
        assert_eq!(counts[&ids[2]], 2);
    }

    #[test]
    fn test_waterfall_drains_shallow_indicator_then_continues() {
        let (a, b) = (IndicatorId::new(), IndicatorId::new());
        let bank = bank(&[(a, 1), (b, 10)]);
        let request = DistributionRequest::new(vec![a, b], 6, DistributionStrategy::Waterfall);

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 6);
        assert_eq!(counts[&a], 1);
        assert_eq!(counts[&b], 5);
    }

    #[test]
    fn test_waterfall_respects_quota() {
        let (a, b) = (IndicatorId::new(), IndicatorId::new());
        let bank = bank(&[(a, 10), (b, 10)]);
        let request = DistributionRequest::new(vec![a, b], 10, DistributionStrategy::Waterfall).with_quota(2);

        let plan = run(&bank, &request).unwrap();
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_priority_first_fills_in_order() {
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let bank = bank(&[(ids[0], 10), (ids[1], 10), (ids[2], 10)]);
        let request = DistributionRequest::new(ids.clone(), 7, DistributionStrategy::PriorityFirst).with_quota(4);

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 7);
        assert_eq!(counts[&ids[0]], 4);
        assert_eq!(counts[&ids[1]], 3);
        assert!(!counts.contains_key(&ids[2]));
    }

    #[test]
    fn test_weighted_minimum_one_each() {
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let bank = bank(&[(ids[0], 10), (ids[1], 10), (ids[2], 10)]);
        let weights = HashMap::from([(ids[0], 10.0), (ids[1], 0.5), (ids[2], 0.5)]);
        let request = DistributionRequest::new(ids.clone(), 6, DistributionStrategy::Weighted).with_weights(weights);

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 6);
        assert_eq!(counts[&ids[1]], 1);
        assert_eq!(counts[&ids[2]], 1);
        assert_eq!(counts[&ids[0]], 4);
    }

    #[test]
    fn test_weighted_non_positive_total_is_empty() {
        let (a, b) = (IndicatorId::new(), IndicatorId::new());
        let bank = bank(&[(a, 5), (b, 5)]);

        let zero = DistributionRequest::new(vec![a, b], 4, DistributionStrategy::Weighted);
        assert_eq!(run(&bank, &zero), Ok(vec![]));

        let negative = DistributionRequest::new(vec![a, b], 4, DistributionStrategy::Weighted)
            .with_weights(HashMap::from([(a, 1.0), (b, -3.0)]));
        assert_eq!(run(&bank, &negative), Ok(vec![]));
    }

    #[test]
    fn test_weighted_rejects_nan() {
        let a = IndicatorId::new();
        let bank = bank(&[(a, 5)]);
        let request = DistributionRequest::new(vec![a], 4, DistributionStrategy::Weighted)
            .with_weights(HashMap::from([(a, f64::NAN)]));
        assert_eq!(run(&bank, &request).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_weighted_shortfall_goes_to_heaviest() {
        let (heavy, light, empty) = (IndicatorId::new(), IndicatorId::new(), IndicatorId::new());
        let bank = bank(&[(heavy, 10), (light, 10)]);
        let weights = HashMap::from([(heavy, 3.0), (light, 1.0), (empty, 2.0)]);
        let request = DistributionRequest::new(vec![light, empty, heavy], 6, DistributionStrategy::Weighted)
            .with_weights(weights);

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 6);
        // heavy 3, empty 2 (unmet), light 1; the unmet 2 go to heavy
        assert_eq!(counts[&heavy], 5);
        assert_eq!(counts[&light], 1);
    }

    fn difficulties(bank: &InMemoryQuestionBank, ids: &[QuestionId], indicator: IndicatorId) -> Vec<DifficultyLevel> {
        ids.iter()
            .filter_map(|id| bank.questions().iter().find(|q| q.id == *id))
            .filter(|q| q.indicator_id == indicator)
            .map(|q| q.difficulty)
            .collect()
    }

    #[test]
    fn test_graduated_waterfall_bands_each_share() {
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let bank = bank(&ids.iter().map(|id| (*id, 15)).collect::<Vec<_>>());
        let request = DistributionRequest::new(ids.clone(), 9, DistributionStrategy::Waterfall)
            .with_criteria(SelectionCriteria::default().graduated());

        let plan = run(&bank, &request).unwrap();
        assert_eq!(plan.len(), 9);
        for id in &ids {
            let mut levels = difficulties(&bank, &plan, *id);
            levels.sort();
            assert_eq!(levels, DifficultyLevel::GRADUATED_BANDS.to_vec());
        }
    }

    #[test]
    fn test_graduated_waterfall_small_shares_keep_balance() {
        let ids: Vec<_> = (0..4).map(|_| IndicatorId::new()).collect();
        let bank = bank(&ids.iter().map(|id| (*id, 10)).collect::<Vec<_>>());
        let request = DistributionRequest::new(ids.clone(), 7, DistributionStrategy::Waterfall)
            .with_criteria(SelectionCriteria::default().with_difficulty(DifficultyLevel::Expert).graduated());

        let plan = run(&bank, &request).unwrap();
        let counts = counts(&bank, &plan);
        assert_eq!(plan.len(), 7);
        assert_eq!(counts.values().max(), Some(&2));
        assert_eq!(counts.values().min(), Some(&1));
        // Shares under three rank by preferred difficulty
        assert!(difficulties(&bank, &plan, ids[0]).iter().all(|d| *d == DifficultyLevel::Expert));
    }

    #[test]
    fn test_weighted_shortfall_refill_stays_graduated() {
        let (heavy, light, empty) = (IndicatorId::new(), IndicatorId::new(), IndicatorId::new());
        let bank = bank(&[(heavy, 20), (light, 20)]);
        let weights = HashMap::from([(heavy, 3.0), (light, 1.0), (empty, 2.0)]);
        let request = DistributionRequest::new(vec![heavy, empty, light], 12, DistributionStrategy::Weighted)
            .with_weights(weights)
            .with_criteria(SelectionCriteria::default().graduated());

        let plan = run(&bank, &request).unwrap();
        let heavy_levels = difficulties(&bank, &plan, heavy);
        assert_eq!(plan.len(), 12);
        // 6 allocated plus the 4 the empty indicator could not fill
        assert_eq!(heavy_levels.len(), 10);
        assert!(heavy_levels
            .iter()
            .all(|d| DifficultyLevel::GRADUATED_BANDS.contains(d)));
    }

    /// Catalog that files every question under every indicator
    struct SharedCatalog(Vec<Question>);

    impl QuestionCatalog for SharedCatalog {
        fn active_questions_for_indicator(&self, _indicator_id: &IndicatorId) -> Vec<Question> {
            self.0.clone()
        }
    }

    #[test]
    fn test_no_duplicates_across_indicators() {
        let shared = IndicatorId::new();
        let catalog = SharedCatalog((0..6).map(|_| Question::new(shared, DifficultyLevel::Expert)).collect());
        let ids: Vec<_> = (0..3).map(|_| IndicatorId::new()).collect();
        let planner = DistributionPlanner::new(IndicatorSelector::new(&catalog, &AllEligible));

        for strategy in [
            DistributionStrategy::Waterfall,
            DistributionStrategy::PriorityFirst,
            DistributionStrategy::Weighted,
        ] {
            let weights = ids.iter().map(|id| (*id, 1.0)).collect();
            let request = DistributionRequest::new(ids.clone(), 10, strategy).with_weights(weights);
            let plan = planner
                .plan(&request, &HashSet::new(), &mut StdRng::seed_from_u64(3))
                .unwrap();
            let unique: HashSet<_> = plan.iter().collect();
            assert_eq!(unique.len(), plan.len(), "{strategy} emitted a duplicate");
            assert_eq!(plan.len(), 6);
        }
    }

    #[test]
    fn test_caller_exclusions_honored() {
        let a = IndicatorId::new();
        let bank = bank(&[(a, 4)]);
        let excluded: HashSet<_> = bank.questions()[..2].iter().map(|q| q.id).collect();
        let planner = DistributionPlanner::new(IndicatorSelector::new(&bank, &AllEligible));
        let request = DistributionRequest::new(vec![a], 10, DistributionStrategy::PriorityFirst);

        let plan = planner
            .plan(&request, &excluded, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|id| !excluded.contains(id)));
    }
}
