//! In-memory implementations of the collaborator ports.
//!
//! Hosts that have already fetched a question bank hand it to
//! [`InMemoryQuestionBank`]; the remaining types are the neutral defaults used
//! when a collaborator is not wired in.

use assessment_domain::competency::BehavioralIndicator;
use assessment_domain::identifiers::{CompetencyId, IndicatorId, QuestionId, TeamId};
use assessment_domain::ports::{
    EligibilityOracle, ExposureTracker, IndicatorCatalog, QuestionCatalog, TeamProfileProvider,
};
use assessment_domain::question::Question;
use assessment_domain::team::TeamProfile;
use std::collections::{HashMap, HashSet};

/// Question and indicator catalog over caller-supplied collections
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionBank {
    questions: Vec<Question>,
    indicators: Vec<BehavioralIndicator>,
    questions_by_indicator: HashMap<IndicatorId, Vec<usize>>,
    indicators_by_competency: HashMap<CompetencyId, Vec<usize>>,
}

impl InMemoryQuestionBank {
    pub fn new(questions: Vec<Question>, indicators: Vec<BehavioralIndicator>) -> Self {
        let mut questions_by_indicator: HashMap<IndicatorId, Vec<usize>> = HashMap::new();
        for (idx, question) in questions.iter().enumerate() {
            questions_by_indicator
                .entry(question.indicator_id)
                .or_default()
                .push(idx);
        }

        let mut indicators_by_competency: HashMap<CompetencyId, Vec<usize>> = HashMap::new();
        for (idx, indicator) in indicators.iter().enumerate() {
            indicators_by_competency
                .entry(indicator.competency_id)
                .or_default()
                .push(idx);
        }

        Self {
            questions,
            indicators,
            questions_by_indicator,
            indicators_by_competency,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn indicators(&self) -> &[BehavioralIndicator] {
        &self.indicators
    }
}

impl QuestionCatalog for InMemoryQuestionBank {
    fn active_questions_for_indicator(&self, indicator_id: &IndicatorId) -> Vec<Question> {
        self.questions_by_indicator
            .get(indicator_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.questions[idx])
            .filter(|q| q.active)
            .cloned()
            .collect()
    }
}

impl IndicatorCatalog for InMemoryQuestionBank {
    fn indicators_for_competency(&self, competency_id: &CompetencyId) -> Vec<BehavioralIndicator> {
        self.indicators_by_competency
            .get(competency_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.indicators[idx])
            .filter(|i| i.active)
            .cloned()
            .collect()
    }

    fn indicators_for_competencies(&self, competency_ids: &[CompetencyId]) -> Vec<BehavioralIndicator> {
        let mut seen = HashSet::new();
        competency_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .flat_map(|id| self.indicators_for_competency(id))
            .collect()
    }
}

/// Oracle that treats every question as valid
#[derive(Debug, Clone, Copy, Default)]
pub struct AllEligible;

impl EligibilityOracle for AllEligible {
    fn is_eligible(&self, _question_id: &QuestionId) -> bool {
        true
    }
}

/// Exposure tracker that discards notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpExposureTracker;

impl ExposureTracker for NoOpExposureTracker {
    fn record_exposure(&self, _question_ids: &[QuestionId]) {}
}

/// Provider with no team data; scoring falls back to self-referential comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTeamProfiles;

impl TeamProfileProvider for NoTeamProfiles {
    fn profile_for(&self, _team_id: &TeamId) -> Option<TeamProfile> {
        None
    }
}
