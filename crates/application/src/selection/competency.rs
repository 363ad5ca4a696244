//! Competency-level selection.
//!
//! Resolves the behavioral indicators behind one or more competencies, puts
//! them in descending weight order and hands them to the distribution planner.

use super::distribution::DistributionPlanner;
use crate::ApplicationResult;
use assessment_common::SelectionConfig;
use assessment_domain::competency::BehavioralIndicator;
use assessment_domain::identifiers::{CompetencyId, QuestionId};
use assessment_domain::ports::IndicatorCatalog;
use assessment_domain::question::DifficultyLevel;
use assessment_domain::selection::{DistributionRequest, DistributionStrategy, SelectionCriteria};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Assemble questions for a set of competencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencySelectionRequest {
    pub competency_ids: Vec<CompetencyId>,
    pub total_budget: usize,
    #[serde(default)]
    pub per_indicator_quota: Option<usize>,
    #[serde(default)]
    pub strategy: DistributionStrategy,
    #[serde(default)]
    pub criteria: SelectionCriteria,
}

impl CompetencySelectionRequest {
    pub fn new(competency_ids: Vec<CompetencyId>, total_budget: usize) -> Self {
        Self {
            competency_ids,
            total_budget,
            per_indicator_quota: None,
            strategy: DistributionStrategy::default(),
            criteria: SelectionCriteria::default(),
        }
    }

    /// Request using the configured strategy, quota and selection toggles
    pub fn from_config(
        config: &SelectionConfig,
        competency_ids: Vec<CompetencyId>,
        total_budget: usize,
        preferred_difficulty: Option<DifficultyLevel>,
    ) -> Self {
        Self {
            competency_ids,
            total_budget,
            per_indicator_quota: config.per_indicator_quota,
            strategy: config.default_strategy,
            criteria: config.criteria(preferred_difficulty),
        }
    }

    pub fn with_strategy(mut self, strategy: DistributionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.per_indicator_quota = Some(quota);
        self
    }

    pub fn with_criteria(mut self, criteria: SelectionCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}

#[derive(Clone, Copy)]
pub struct CompetencySelector<'a> {
    indicators: &'a dyn IndicatorCatalog,
    planner: DistributionPlanner<'a>,
}

impl<'a> CompetencySelector<'a> {
    pub fn new(indicators: &'a dyn IndicatorCatalog, planner: DistributionPlanner<'a>) -> Self {
        Self { indicators, planner }
    }

    /// Select questions for a single competency
    pub fn select_for_competency<R: Rng + ?Sized>(
        &self,
        competency_id: CompetencyId,
        request: &CompetencySelectionRequest,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> ApplicationResult<Vec<QuestionId>> {
        let request = CompetencySelectionRequest {
            competency_ids: vec![competency_id],
            ..request.clone()
        };
        self.select_for_competencies(&request, exclude, rng)
    }

    pub fn select_for_competencies<R: Rng + ?Sized>(
        &self,
        request: &CompetencySelectionRequest,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> ApplicationResult<Vec<QuestionId>> {
        let indicators = self.resolve_indicators(&request.competency_ids);
        if indicators.is_empty() {
            warn!(
                competencies = request.competency_ids.len(),
                "No active indicators for requested competencies"
            );
            return Ok(Vec::new());
        }

        let distribution = DistributionRequest::new(
            indicators.iter().map(|i| i.id).collect(),
            request.total_budget,
            request.strategy,
        )
        .with_weights(indicators.iter().map(|i| (i.id, i.weight)).collect())
        .with_criteria(request.criteria);
        let distribution = match request.per_indicator_quota {
            Some(quota) => distribution.with_quota(quota),
            None => distribution,
        };

        self.planner.plan(&distribution, exclude, rng)
    }

    /// Active indicators, deduplicated, heaviest first.
    ///
    /// The sort is stable so equal weights keep catalog order.
    fn resolve_indicators(&self, competency_ids: &[CompetencyId]) -> Vec<BehavioralIndicator> {
        let mut unique = HashSet::with_capacity(competency_ids.len());
        let competency_ids: Vec<CompetencyId> = competency_ids
            .iter()
            .copied()
            .filter(|id| unique.insert(*id))
            .collect();

        let fetched = match competency_ids.as_slice() {
            [] => Vec::new(),
            [single] => self.indicators.indicators_for_competency(single),
            many => self.indicators.indicators_for_competencies(many),
        };

        let mut seen = HashSet::with_capacity(fetched.len());
        let mut indicators: Vec<BehavioralIndicator> = fetched
            .into_iter()
            .filter(|i| i.active)
            .filter(|i| seen.insert(i.id))
            .collect();
        indicators.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        debug!(
            competencies = competency_ids.len(),
            indicators = indicators.len(),
            "Resolved indicators"
        );
        indicators
    }
}
