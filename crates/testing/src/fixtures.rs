//! Test fixtures for generating domain entities with realistic data.
//!
//! Names come from `fake`; structure (counts, difficulty spread, weights) is
//! deterministic so assertions can rely on it.

use assessment_common::EngineConfig;
use assessment_domain::{
    answer::Answer,
    competency::{parse_esco_uri, BehavioralIndicator, BigFiveTrait, Competency, OnetCode},
    identifiers::*,
    question::{DifficultyLevel, Question},
    team::TeamProfile,
};
use fake::{
    faker::{company::en::Buzzword, lorem::en::Word},
    Fake,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A self-consistent competency -> indicator -> question bank
#[derive(Debug, Clone, Default)]
pub struct TestBank {
    pub competencies: Vec<Competency>,
    pub indicators: Vec<BehavioralIndicator>,
    pub questions: Vec<Question>,
}

impl TestBank {
    pub fn indicators_for(&self, competency_id: CompetencyId) -> Vec<&BehavioralIndicator> {
        self.indicators
            .iter()
            .filter(|i| i.competency_id == competency_id)
            .collect()
    }

    pub fn questions_for(&self, indicator_id: IndicatorId) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.indicator_id == indicator_id)
            .collect()
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Indicator a selected question belongs to
    pub fn indicator_of(&self, id: QuestionId) -> Option<IndicatorId> {
        self.question(id).map(|q| q.indicator_id)
    }

    /// One Likert answer with the same value for every question
    pub fn likert_answers(&self, value: i32) -> Vec<Answer> {
        self.questions.iter().map(|q| Answer::likert(q.id, value)).collect()
    }
}

/// Create a competency with a generated name and no mappings
pub fn create_test_competency() -> Competency {
    let buzzword: String = Buzzword().fake();
    let word: String = Word().fake();
    Competency::new(format!("{buzzword} {word}"))
}

/// Create a competency carrying O*NET, ESCO and Big Five mappings
pub fn create_test_competency_with_mappings(big_five: BigFiveTrait) -> Competency {
    let mut competency = create_test_competency();
    competency.mappings.onet_code = OnetCode::parse("15-1252.00").ok();
    competency.mappings.esco_uri =
        parse_esco_uri("http://data.europa.eu/esco/skill/0a2d1a3f-0e7e-4b5c-9f58-6c1c0d0d4a11").ok();
    competency.mappings.big_five = Some(big_five);
    competency
}

/// Create a bank of `competencies` x `indicators_each` x `questions_each`.
///
/// Indicator weights descend within a competency (n, n-1, ..., 1) and
/// question difficulties cycle through every level.
pub fn create_test_bank(competencies: usize, indicators_each: usize, questions_each: usize) -> TestBank {
    let mut bank = TestBank::default();

    for _ in 0..competencies {
        let competency = create_test_competency();
        for rank in 0..indicators_each {
            let indicator = BehavioralIndicator::new(competency.id, (indicators_each - rank) as f64);
            for n in 0..questions_each {
                bank.questions.push(Question::new(
                    indicator.id,
                    DifficultyLevel::ALL[n % DifficultyLevel::ALL.len()],
                ));
            }
            bank.indicators.push(indicator);
        }
        bank.competencies.push(competency);
    }

    bank
}

/// Create a team of the given size with no saturation or personality data
pub fn create_test_team(member_count: u32) -> TeamProfile {
    TeamProfile::new(TeamId::new(), member_count)
}

/// Deterministic random source for selection tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Engine configuration with a fixed selection seed
pub fn create_test_engine_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.selection.random_seed = Some(42);
    config
}
