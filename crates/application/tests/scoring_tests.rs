//! Integration tests for team-fit scoring

use assessment_application::scoring::{normalize, BalanceMultiplierCalculator};
use assessment_application::{ScoringRequest, TeamFitScoringEngine};
use assessment_domain::{
    answer::Answer,
    competency::{BehavioralIndicator, BigFiveTrait, Competency},
    identifiers::{IndicatorId, QuestionId},
    policy::{ScoringPolicy, MULTIPLIER_CEILING, MULTIPLIER_FLOOR},
    question::Question,
    scoring::FitClassification,
    team::TeamProfile,
};
use assessment_testing::{
    create_test_bank, create_test_competency, create_test_competency_with_mappings, strategies,
    AnswerBuilder, MockTeamProfileProvider, QuestionBuilder, TeamProfileBuilder,
};
use proptest::prelude::*;
use std::sync::Arc;

/// One indicator per competency, `per_competency` questions each
fn session_for(competencies: &[Competency], per_competency: usize) -> (Vec<Question>, Vec<BehavioralIndicator>) {
    let indicators: Vec<_> = competencies
        .iter()
        .map(|c| BehavioralIndicator::new(c.id, 1.0))
        .collect();
    let questions = indicators
        .iter()
        .flat_map(|i| QuestionBuilder::new(i.id).build_many(per_competency))
        .collect();
    (questions, indicators)
}

fn likert_for(questions: &[Question], indicator: IndicatorId, value: i32) -> Vec<Answer> {
    questions
        .iter()
        .filter(|q| q.indicator_id == indicator)
        .map(|q| Answer::likert(q.id, value))
        .collect()
}

fn engine_with_team(team: TeamProfile) -> TeamFitScoringEngine {
    TeamFitScoringEngine::builder()
        .team_profiles(Arc::new(MockTeamProfileProvider::with_profile(team)))
        .build()
}

proptest! {
    #[test]
    fn prop_normalized_value_in_unit_range(answer in strategies::answer_for(QuestionId::new())) {
        let value = normalize(&answer);
        prop_assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn prop_multiplier_stays_bounded(
        balance in -1.0f64..=1.0,
        compatibility in proptest::option::of(0.0f64..=1.0),
        penalty in 0.5f64..1.0,
        bonus in 1.0f64..1.5,
        steepness in 0.1f64..20.0,
    ) {
        let policy = ScoringPolicy {
            balance_penalty: penalty,
            balance_bonus: bonus,
            sigmoid_steepness: steepness,
            ..ScoringPolicy::default()
        };
        let multiplier = BalanceMultiplierCalculator::from_policy(&policy).multiplier(balance, compatibility);
        prop_assert!((MULTIPLIER_FLOOR..=MULTIPLIER_CEILING).contains(&multiplier));
    }

    #[test]
    fn prop_score_is_bounded(
        values in prop::collection::vec(-2i32..8, 12),
        skipped in prop::collection::vec(prop::bool::weighted(0.2), 12),
        saturation in prop::collection::vec(0.0f64..=1.0, 2),
        members in 1u32..12,
    ) {
        let bank = create_test_bank(2, 2, 3);
        let answers: Vec<_> = bank
            .questions
            .iter()
            .zip(values.iter().zip(&skipped))
            .map(|(q, (value, skip))| {
                let builder = AnswerBuilder::likert(q.id, *value);
                if *skip { builder.skipped().build() } else { builder.build() }
            })
            .collect();
        let team = bank
            .competencies
            .iter()
            .zip(&saturation)
            .fold(TeamProfileBuilder::new().with_members(members), |b, (c, s)| {
                b.with_saturation(c.id, *s)
            })
            .build();
        let request = ScoringRequest::new(
            answers,
            bank.questions.clone(),
            bank.indicators.clone(),
            bank.competencies.clone(),
        )
        .with_team(team.team_id);

        let result = engine_with_team(team).score(&request);

        prop_assert!((0.0..=100.0).contains(&result.percentage));
        prop_assert!((0.0..=100.0).contains(&result.raw_percentage));
        prop_assert!((MULTIPLIER_FLOOR..=MULTIPLIER_CEILING).contains(&result.team_fit.multiplier));
        prop_assert!((result.overall_score - result.percentage / 100.0).abs() < 1e-12);
        prop_assert!(result.competency_scores.iter().all(|s| (0.0..=100.0).contains(&s.percentage)));
        if result.passed {
            prop_assert!(result.percentage / 100.0 >= result.pass_threshold);
            prop_assert!(result.team_fit.classified_count() > 0);
        }
    }
}

#[test]
fn test_likert_normalization_points() {
    let id = QuestionId::new();
    assert_eq!(normalize(&Answer::likert(id, 1)), 0.0);
    assert_eq!(normalize(&Answer::likert(id, 3)), 0.5);
    assert_eq!(normalize(&Answer::likert(id, 5)), 1.0);
    assert_eq!(normalize(&AnswerBuilder::likert(id, 5).skipped().build()), 0.0);
}

#[test]
fn test_empty_session_scores_zero_and_fails() {
    let result = TeamFitScoringEngine::default().score(&ScoringRequest::default());
    assert_eq!(result.percentage, 0.0);
    assert!(!result.passed);
    assert!(result.competency_scores.is_empty());
}

#[test]
fn test_fully_skipped_session_scores_zero_and_fails() {
    let bank = create_test_bank(2, 1, 4);
    let answers = bank
        .questions
        .iter()
        .map(|q| AnswerBuilder::likert(q.id, 5).skipped().build())
        .collect();
    let request = ScoringRequest::new(
        answers,
        bank.questions.clone(),
        bank.indicators.clone(),
        bank.competencies.clone(),
    );

    let result = TeamFitScoringEngine::default().score(&request);

    assert_eq!(result.percentage, 0.0);
    assert!(!result.passed);
    assert_eq!(result.team_fit.classified_count(), 0);
}

#[test]
fn test_team_saturation_threshold_boundaries() {
    let cases = [
        (0.75, FitClassification::Saturation),
        (0.749, FitClassification::Diversity),
        (0.5, FitClassification::Diversity),
        (0.499, FitClassification::Gap),
    ];

    for (ratio, expected) in cases {
        let competency = create_test_competency();
        let (questions, indicators) = session_for(std::slice::from_ref(&competency), 2);
        let answers = likert_for(&questions, indicators[0].id, 4);
        let team = TeamProfileBuilder::new().with_saturation(competency.id, ratio).build();
        let request = ScoringRequest::new(answers, questions, indicators, vec![competency])
            .with_team(team.team_id);

        let result = engine_with_team(team).score(&request);

        assert_eq!(result.competency_scores[0].classification, Some(expected), "ratio {ratio}");
        assert_eq!(result.competency_scores[0].comparison_ratio, Some(ratio));
    }
}

#[test]
fn test_esco_boost_weights_mapped_competency() {
    let mapped = create_test_competency_with_mappings(BigFiveTrait::Conscientiousness);
    let plain = create_test_competency();
    let competencies = vec![mapped.clone(), plain.clone()];
    let (questions, indicators) = session_for(&competencies, 3);
    let mut answers = likert_for(&questions, indicators[0].id, 5);
    answers.extend(likert_for(&questions, indicators[1].id, 1));
    let request = ScoringRequest::new(answers, questions, indicators, competencies);

    let result = TeamFitScoringEngine::default().score(&request);

    // 100% at weight 1.15 * 1.1 against 0% at weight 1
    let expected_raw = 100.0 * 1.265 / 2.265;
    assert!((result.raw_percentage - expected_raw).abs() < 1e-9);
    assert_eq!(result.competency_scores[0].big_five, Some(BigFiveTrait::Conscientiousness));

    // Self-referential: one SATURATION, one GAP, no diversity
    assert_eq!(result.team_fit.saturation_count, 1);
    assert_eq!(result.team_fit.gap_count, 1);
    assert!(!result.team_fit.team_profile_used);
    assert!(result.percentage < result.raw_percentage);
    assert!(!result.passed);
}

#[test]
fn test_small_team_lowers_pass_threshold() {
    let competency = create_test_competency();
    let (questions, indicators) = session_for(std::slice::from_ref(&competency), 4);
    let answers = likert_for(&questions, indicators[0].id, 3);

    let score_with_members = |members: u32| {
        let team = TeamProfileBuilder::new()
            .with_members(members)
            .with_saturation(competency.id, 0.6)
            .build();
        let request = ScoringRequest::new(
            answers.clone(),
            questions.clone(),
            indicators.clone(),
            vec![competency.clone()],
        )
        .with_team(team.team_id);
        engine_with_team(team).score(&request)
    };

    // 50% raw, full diversity pushes the multiplier just under 1.1
    let small = score_with_members(3);
    assert!((small.pass_threshold - 0.5).abs() < 1e-9);
    assert!(small.percentage > 54.0 && small.percentage < 55.0);
    assert!(small.passed);

    let large = score_with_members(8);
    assert!((large.pass_threshold - 0.6).abs() < 1e-9);
    assert!(!large.passed);
}

#[test]
fn test_unknown_team_scores_self_referentially() {
    let competency = create_test_competency();
    let (questions, indicators) = session_for(std::slice::from_ref(&competency), 2);
    let answers = likert_for(&questions, indicators[0].id, 5);
    let provider = Arc::new(MockTeamProfileProvider::new());
    let engine = TeamFitScoringEngine::builder().team_profiles(provider.clone()).build();
    let request = ScoringRequest::new(answers, questions, indicators, vec![competency])
        .with_team(assessment_domain::identifiers::TeamId::new());

    let result = engine.score(&request);

    assert_eq!(provider.lookup_count(), 1);
    assert!(!result.team_fit.team_profile_used);
    assert_eq!(result.competency_scores[0].comparison_ratio, Some(1.0));
    assert_eq!(result.competency_scores[0].classification, Some(FitClassification::Saturation));
    // Base threshold applies without a team profile
    assert!((result.pass_threshold - 0.6).abs() < 1e-9);
}

#[test]
fn test_personality_compatibility_shifts_multiplier() {
    let competency = create_test_competency_with_mappings(BigFiveTrait::Openness);
    let (questions, indicators) = session_for(std::slice::from_ref(&competency), 2);
    let answers = likert_for(&questions, indicators[0].id, 5);

    let score_against = |team_openness: f64| {
        let team = TeamProfileBuilder::new()
            .with_saturation(competency.id, 0.6)
            .with_trait(BigFiveTrait::Openness, team_openness)
            .build();
        let request = ScoringRequest::new(
            answers.clone(),
            questions.clone(),
            indicators.clone(),
            vec![competency.clone()],
        )
        .with_team(team.team_id);
        engine_with_team(team).score(&request)
    };

    let aligned = score_against(100.0);
    let opposed = score_against(0.0);

    assert_eq!(aligned.team_fit.personality_compatibility, Some(1.0));
    assert_eq!(opposed.team_fit.personality_compatibility, Some(0.0));
    assert!(aligned.team_fit.multiplier > opposed.team_fit.multiplier);
}

#[test]
fn test_scoring_result_serializes() {
    let bank = create_test_bank(1, 2, 2);
    let request = ScoringRequest::new(
        bank.likert_answers(4),
        bank.questions.clone(),
        bank.indicators.clone(),
        bank.competencies.clone(),
    );
    let result = TeamFitScoringEngine::default().score(&request);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["passed"], serde_json::json!(result.passed));
    assert!(json["team_fit"]["multiplier"].is_number());
    assert_eq!(json["competency_scores"][0]["classification"], "SATURATION");
}
