//! Mock implementations of the collaborator ports.
//!
//! All mocks are in-memory and safe to share across threads.

use assessment_domain::{
    competency::BehavioralIndicator,
    identifiers::*,
    ports::{
        EligibilityOracle, ExposureTracker, IndicatorCatalog, QuestionCatalog, TeamProfileProvider,
    },
    question::Question,
    team::TeamProfile,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock question catalog that counts fetches
#[derive(Default)]
pub struct MockQuestionCatalog {
    questions: RwLock<HashMap<IndicatorId, Vec<Question>>>,
    fetches: AtomicUsize,
}

impl MockQuestionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let catalog = Self::new();
        for question in questions {
            catalog.add(question);
        }
        catalog
    }

    pub fn add(&self, question: Question) {
        self.questions
            .write()
            .entry(question.indicator_id)
            .or_default()
            .push(question);
    }

    /// Mark a stored question inactive
    pub fn deactivate(&self, question_id: QuestionId) {
        for question in self.questions.write().values_mut().flatten() {
            if question.id == question_id {
                question.active = false;
            }
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl QuestionCatalog for MockQuestionCatalog {
    fn active_questions_for_indicator(&self, indicator_id: &IndicatorId) -> Vec<Question> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.questions
            .read()
            .get(indicator_id)
            .map(|qs| qs.iter().filter(|q| q.active).cloned().collect())
            .unwrap_or_default()
    }
}

/// Mock indicator catalog
#[derive(Default)]
pub struct MockIndicatorCatalog {
    indicators: RwLock<Vec<BehavioralIndicator>>,
    batch_lookups: AtomicUsize,
}

impl MockIndicatorCatalog {
    pub fn with_indicators(indicators: impl IntoIterator<Item = BehavioralIndicator>) -> Self {
        Self {
            indicators: RwLock::new(indicators.into_iter().collect()),
            batch_lookups: AtomicUsize::new(0),
        }
    }

    pub fn add(&self, indicator: BehavioralIndicator) {
        self.indicators.write().push(indicator);
    }

    /// Number of multi-competency lookups served
    pub fn batch_lookup_count(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }
}

impl IndicatorCatalog for MockIndicatorCatalog {
    fn indicators_for_competency(&self, competency_id: &CompetencyId) -> Vec<BehavioralIndicator> {
        self.indicators
            .read()
            .iter()
            .filter(|i| i.competency_id == *competency_id)
            .cloned()
            .collect()
    }

    fn indicators_for_competencies(&self, competency_ids: &[CompetencyId]) -> Vec<BehavioralIndicator> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        let wanted: HashSet<_> = competency_ids.iter().collect();
        self.indicators
            .read()
            .iter()
            .filter(|i| wanted.contains(&i.competency_id))
            .cloned()
            .collect()
    }
}

/// Mock eligibility oracle with a mutable retired set
#[derive(Default)]
pub struct MockEligibilityOracle {
    retired: RwLock<HashSet<QuestionId>>,
}

impl MockEligibilityOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retire(&self, question_id: QuestionId) {
        self.retired.write().insert(question_id);
    }

    pub fn retired_count(&self) -> usize {
        self.retired.read().len()
    }
}

impl EligibilityOracle for MockEligibilityOracle {
    fn is_eligible(&self, question_id: &QuestionId) -> bool {
        !self.retired.read().contains(question_id)
    }
}

/// Exposure tracker that records every notification
#[derive(Default)]
pub struct RecordingExposureTracker {
    calls: RwLock<Vec<Vec<QuestionId>>>,
}

impl RecordingExposureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Vec<QuestionId>> {
        self.calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().len()
    }

    /// Every id ever reported, in order
    pub fn exposed(&self) -> Vec<QuestionId> {
        self.calls.read().iter().flatten().copied().collect()
    }

    pub fn clear(&self) {
        self.calls.write().clear();
    }
}

impl ExposureTracker for RecordingExposureTracker {
    fn record_exposure(&self, question_ids: &[QuestionId]) {
        self.calls.write().push(question_ids.to_vec());
    }
}

/// Mock team profile provider that counts lookups
#[derive(Default)]
pub struct MockTeamProfileProvider {
    profiles: RwLock<HashMap<TeamId, TeamProfile>>,
    lookups: AtomicUsize,
}

impl MockTeamProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: TeamProfile) -> Self {
        let provider = Self::new();
        provider.insert(profile);
        provider
    }

    pub fn insert(&self, profile: TeamProfile) {
        self.profiles.write().insert(profile.team_id, profile);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TeamProfileProvider for MockTeamProfileProvider {
    fn profile_for(&self, team_id: &TeamId) -> Option<TeamProfile> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.profiles.read().get(team_id).cloned()
    }
}
