//! Answer normalization to the unit interval.

use assessment_domain::answer::{Answer, AnswerKind, LIKERT_MAX, LIKERT_MIN};

/// Map an answer to a score in [0, 1].
///
/// Never fails: skipped answers, answers without a question and answers
/// without any value all score 0. When the value matching the declared kind
/// is missing, whichever other value is present is used instead.
pub fn normalize(answer: &Answer) -> f64 {
    if answer.skipped || answer.question_id.is_none() {
        return 0.0;
    }

    let ordinal = || answer.ordinal_value.map(likert_score);
    let binary = || answer.correct.map(binary_score);
    let continuous = || answer.continuous_value.and_then(continuous_score);

    let score = match answer.kind {
        AnswerKind::Likert => ordinal().or_else(continuous).or_else(binary),
        AnswerKind::Binary => binary().or_else(continuous).or_else(ordinal),
        AnswerKind::Continuous => continuous().or_else(ordinal).or_else(binary),
    };

    score.unwrap_or(0.0).clamp(0.0, 1.0)
}

fn likert_score(value: i32) -> f64 {
    let clamped = value.clamp(LIKERT_MIN, LIKERT_MAX);
    f64::from(clamped - LIKERT_MIN) / f64::from(LIKERT_MAX - LIKERT_MIN)
}

fn binary_score(correct: bool) -> f64 {
    if correct {
        1.0
    } else {
        0.0
    }
}

fn continuous_score(value: f64) -> Option<f64> {
    (!value.is_nan()).then(|| value.clamp(0.0, 1.0))
}
