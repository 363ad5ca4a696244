//! Property-based testing strategies for domain values.

use assessment_domain::{
    answer::{Answer, AnswerKind},
    identifiers::QuestionId,
    question::DifficultyLevel,
    selection::DistributionStrategy,
};
use proptest::prelude::*;

pub fn difficulty() -> impl Strategy<Value = DifficultyLevel> {
    prop::sample::select(DifficultyLevel::ALL.to_vec())
}

pub fn distribution_strategy() -> impl Strategy<Value = DistributionStrategy> {
    prop_oneof![
        Just(DistributionStrategy::Waterfall),
        Just(DistributionStrategy::Weighted),
        Just(DistributionStrategy::PriorityFirst),
    ]
}

pub fn answer_kind() -> impl Strategy<Value = AnswerKind> {
    prop_oneof![
        Just(AnswerKind::Likert),
        Just(AnswerKind::Binary),
        Just(AnswerKind::Continuous),
    ]
}

/// Arbitrary, possibly malformed answer to `question_id`.
///
/// Values may be out of range, NaN, missing, or of a different kind than
/// declared; the answer may be skipped or lose its question reference.
pub fn answer_for(question_id: QuestionId) -> impl Strategy<Value = Answer> {
    (
        answer_kind(),
        proptest::option::of(-10i32..20),
        proptest::option::of(any::<bool>()),
        proptest::option::of(prop_oneof![-2.0f64..3.0, Just(f64::NAN)]),
        any::<bool>(),
        prop::bool::weighted(0.1),
    )
        .prop_map(move |(kind, ordinal, correct, continuous, skipped, orphan)| {
            let mut answer = Answer::likert(question_id, 0);
            answer.kind = kind;
            answer.ordinal_value = ordinal;
            answer.correct = correct;
            answer.continuous_value = continuous;
            answer.skipped = skipped;
            if orphan {
                answer.question_id = None;
            }
            answer
        })
}

/// Positive indicator weights, `len` entries
pub fn positive_weights(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..100.0, len)
}
