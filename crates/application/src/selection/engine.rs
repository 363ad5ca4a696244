//! Selection engine facade.

use super::competency::{CompetencySelectionRequest, CompetencySelector};
use super::distribution::DistributionPlanner;
use super::indicator::IndicatorSelector;
use crate::catalog::{AllEligible, InMemoryQuestionBank, NoOpExposureTracker};
use crate::ApplicationResult;
use assessment_domain::identifiers::{IndicatorId, QuestionId};
use assessment_domain::ports::{EligibilityOracle, ExposureTracker, IndicatorCatalog, QuestionCatalog};
use assessment_domain::selection::{DistributionRequest, SelectionCriteria};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Entry point for question assembly.
///
/// Wires the collaborator ports into the per-call selectors and reports every
/// successful selection, empty or not, to the exposure tracker exactly once.
#[derive(Clone)]
pub struct SelectionEngine {
    questions: Arc<dyn QuestionCatalog>,
    indicators: Arc<dyn IndicatorCatalog>,
    eligibility: Arc<dyn EligibilityOracle>,
    exposure: Arc<dyn ExposureTracker>,
}

impl SelectionEngine {
    pub fn new(
        questions: Arc<dyn QuestionCatalog>,
        indicators: Arc<dyn IndicatorCatalog>,
        eligibility: Arc<dyn EligibilityOracle>,
        exposure: Arc<dyn ExposureTracker>,
    ) -> Self {
        Self {
            questions,
            indicators,
            eligibility,
            exposure,
        }
    }

    /// Engine over an in-memory bank, every question eligible, exposure discarded
    pub fn in_memory(bank: Arc<InMemoryQuestionBank>) -> Self {
        Self::new(
            bank.clone(),
            bank,
            Arc::new(AllEligible),
            Arc::new(NoOpExposureTracker),
        )
    }

    pub fn with_eligibility(mut self, eligibility: Arc<dyn EligibilityOracle>) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_exposure_tracker(mut self, exposure: Arc<dyn ExposureTracker>) -> Self {
        self.exposure = exposure;
        self
    }

    fn indicator_selector(&self) -> IndicatorSelector<'_> {
        IndicatorSelector::new(self.questions.as_ref(), self.eligibility.as_ref())
    }

    fn planner(&self) -> DistributionPlanner<'_> {
        DistributionPlanner::new(self.indicator_selector())
    }

    /// Select up to `max_count` questions for a single indicator
    #[instrument(skip(self, criteria, exclude, rng), fields(excluded = exclude.len()))]
    pub fn select_for_indicator<R: Rng + ?Sized>(
        &self,
        indicator_id: IndicatorId,
        max_count: usize,
        criteria: &SelectionCriteria,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Vec<QuestionId> {
        let selected = self
            .indicator_selector()
            .draw(&indicator_id, max_count, criteria, exclude, rng);
        info!(selected = selected.len(), "Indicator selection complete");
        self.record(&selected);
        selected
    }

    /// Spread a budget across explicit indicators
    #[instrument(
        skip(self, request, exclude, rng),
        fields(
            strategy = %request.strategy,
            indicators = request.indicator_ids.len(),
            budget = request.total_budget
        )
    )]
    pub fn plan<R: Rng + ?Sized>(
        &self,
        request: &DistributionRequest,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> ApplicationResult<Vec<QuestionId>> {
        let selected = self.planner().plan(request, exclude, rng)?;
        self.record(&selected);
        Ok(selected)
    }

    /// Assemble questions across the indicators of several competencies
    #[instrument(
        skip(self, request, exclude, rng),
        fields(
            competencies = request.competency_ids.len(),
            strategy = %request.strategy,
            budget = request.total_budget
        )
    )]
    pub fn select_for_competencies<R: Rng + ?Sized>(
        &self,
        request: &CompetencySelectionRequest,
        exclude: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> ApplicationResult<Vec<QuestionId>> {
        let selector = CompetencySelector::new(self.indicators.as_ref(), self.planner());
        let selected = selector.select_for_competencies(request, exclude, rng)?;
        self.record(&selected);
        Ok(selected)
    }

    fn record(&self, selected: &[QuestionId]) {
        debug_assert_eq!(
            selected.iter().collect::<HashSet<_>>().len(),
            selected.len(),
            "selection emitted a duplicate question id"
        );
        debug!(exposed = selected.len(), "Recording exposure");
        self.exposure.record_exposure(selected);
    }
}
