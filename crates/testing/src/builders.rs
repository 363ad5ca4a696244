//! Fluent builder pattern for constructing test data.

use assessment_domain::{
    answer::{Answer, AnswerKind},
    competency::{parse_esco_uri, BigFiveTrait, Competency, OnetCode, StandardMappings},
    identifiers::*,
    question::{DifficultyLevel, Question},
    team::{PersonalityProfile, TeamProfile},
};
use std::collections::{BTreeSet, HashMap};

/// Builder for creating Question test instances
#[derive(Clone)]
pub struct QuestionBuilder {
    id: QuestionId,
    indicator_id: IndicatorId,
    difficulty: DifficultyLevel,
    active: bool,
    tags: BTreeSet<String>,
}

impl QuestionBuilder {
    pub fn new(indicator_id: IndicatorId) -> Self {
        Self {
            id: QuestionId::new(),
            indicator_id,
            difficulty: DifficultyLevel::Intermediate,
            active: true,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_id(mut self, id: QuestionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn build(self) -> Question {
        Question {
            id: self.id,
            indicator_id: self.indicator_id,
            difficulty: self.difficulty,
            active: self.active,
            tags: self.tags,
        }
    }

    /// Build `count` questions differing only in id
    pub fn build_many(self, count: usize) -> Vec<Question> {
        (0..count)
            .map(|_| self.clone().with_id(QuestionId::new()).build())
            .collect()
    }
}

/// Builder for creating Competency test instances
#[derive(Clone)]
pub struct CompetencyBuilder {
    id: CompetencyId,
    name: String,
    mappings: StandardMappings,
}

impl CompetencyBuilder {
    pub fn new() -> Self {
        Self {
            id: CompetencyId::new(),
            name: "Collaboration".to_string(),
            mappings: StandardMappings::default(),
        }
    }

    pub fn with_id(mut self, id: CompetencyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Panics on an invalid code; test input is expected to be well-formed
    pub fn with_onet(mut self, code: &str) -> Self {
        self.mappings.onet_code = Some(OnetCode::parse(code).expect("valid O*NET code"));
        self
    }

    pub fn with_esco(mut self, uri: &str) -> Self {
        self.mappings.esco_uri = Some(parse_esco_uri(uri).expect("valid ESCO URI"));
        self
    }

    pub fn with_big_five(mut self, big_five: BigFiveTrait) -> Self {
        self.mappings.big_five = Some(big_five);
        self
    }

    pub fn build(self) -> Competency {
        Competency {
            id: self.id,
            name: self.name,
            mappings: self.mappings,
        }
    }
}

impl Default for CompetencyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating TeamProfile test instances
#[derive(Clone)]
pub struct TeamProfileBuilder {
    team_id: TeamId,
    member_count: u32,
    saturation: HashMap<CompetencyId, f64>,
    personality: PersonalityProfile,
}

impl TeamProfileBuilder {
    pub fn new() -> Self {
        Self {
            team_id: TeamId::new(),
            member_count: 8,
            saturation: HashMap::new(),
            personality: PersonalityProfile::new(),
        }
    }

    pub fn with_team_id(mut self, team_id: TeamId) -> Self {
        self.team_id = team_id;
        self
    }

    pub fn with_members(mut self, member_count: u32) -> Self {
        self.member_count = member_count;
        self
    }

    pub fn with_saturation(mut self, competency_id: CompetencyId, ratio: f64) -> Self {
        self.saturation.insert(competency_id, ratio);
        self
    }

    pub fn with_trait(mut self, big_five: BigFiveTrait, score: f64) -> Self {
        self.personality.insert(big_five, score);
        self
    }

    pub fn build(self) -> TeamProfile {
        TeamProfile {
            team_id: self.team_id,
            member_count: self.member_count,
            saturation: self.saturation,
            personality: self.personality,
        }
    }
}

impl Default for TeamProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating Answer test instances
#[derive(Clone)]
pub struct AnswerBuilder {
    answer: Answer,
}

impl AnswerBuilder {
    pub fn likert(question_id: QuestionId, value: i32) -> Self {
        Self {
            answer: Answer::likert(question_id, value),
        }
    }

    pub fn binary(question_id: QuestionId, correct: bool) -> Self {
        Self {
            answer: Answer::binary(question_id, correct),
        }
    }

    pub fn continuous(question_id: QuestionId, value: f64) -> Self {
        Self {
            answer: Answer::continuous(question_id, value),
        }
    }

    /// Declare a different kind than the value carried
    pub fn as_kind(mut self, kind: AnswerKind) -> Self {
        self.answer.kind = kind;
        self
    }

    pub fn skipped(mut self) -> Self {
        self.answer.skipped = true;
        self
    }

    pub fn without_question(mut self) -> Self {
        self.answer.question_id = None;
        self
    }

    pub fn without_value(mut self) -> Self {
        self.answer.ordinal_value = None;
        self.answer.correct = None;
        self.answer.continuous_value = None;
        self
    }

    pub fn build(self) -> Answer {
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_builder() {
        let indicator = IndicatorId::new();
        let question = QuestionBuilder::new(indicator)
            .with_difficulty(DifficultyLevel::Expert)
            .with_tag("SALES")
            .inactive()
            .build();
        assert_eq!(question.indicator_id, indicator);
        assert_eq!(question.difficulty, DifficultyLevel::Expert);
        assert!(!question.active);
        assert!(!question.is_context_neutral());
    }

    #[test]
    fn test_build_many_unique_ids() {
        let questions = QuestionBuilder::new(IndicatorId::new()).build_many(4);
        let ids: BTreeSet<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_competency_builder_mappings() {
        let competency = CompetencyBuilder::new()
            .with_name("Analytical Thinking")
            .with_onet("15-2051.00")
            .with_esco("http://data.europa.eu/esco/skill/analytical")
            .with_big_five(BigFiveTrait::Openness)
            .build();
        assert_eq!(competency.name, "Analytical Thinking");
        assert!(competency.mappings.has_esco());
        assert!(competency.mappings.has_big_five());
    }

    #[test]
    fn test_team_profile_builder() {
        let competency = CompetencyId::new();
        let team = TeamProfileBuilder::new()
            .with_members(3)
            .with_saturation(competency, 0.8)
            .with_trait(BigFiveTrait::Extraversion, 55.0)
            .build();
        assert_eq!(team.member_count, 3);
        assert_eq!(team.saturation_for(&competency), Some(0.8));
        assert!(team.has_personality_data());
    }

    #[test]
    fn test_answer_builder() {
        let answer = AnswerBuilder::likert(QuestionId::new(), 4).skipped().build();
        assert!(answer.skipped);
        assert!(!answer.is_scoreable());

        let answer = AnswerBuilder::binary(QuestionId::new(), true).without_value().build();
        assert!(!answer.has_value());
    }
}
