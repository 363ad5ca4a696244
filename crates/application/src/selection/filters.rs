//! Question eligibility and context-neutrality checks.

use assessment_domain::ports::EligibilityOracle;
use assessment_domain::question::Question;

/// Gate questions on their externally tracked validity state.
///
/// Holds no state of its own; retirement is decided by the oracle.
#[derive(Clone, Copy)]
pub struct EligibilityFilter<'a> {
    oracle: &'a dyn EligibilityOracle,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(oracle: &'a dyn EligibilityOracle) -> Self {
        Self { oracle }
    }

    pub fn is_eligible(&self, question: &Question) -> bool {
        is_eligible(self.oracle, question)
    }
}

/// An inactive question is never eligible, whatever the oracle says
pub fn is_eligible(oracle: &dyn EligibilityOracle, question: &Question) -> bool {
    question.active && oracle.is_eligible(&question.id)
}

/// True iff the question has no tags or is tagged GENERAL.
///
/// Anything else (IT, SALES, ...) is context-specific and stays out of
/// universal-baseline assessments.
pub fn is_context_neutral(question: &Question) -> bool {
    question.is_context_neutral()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_domain::identifiers::{IndicatorId, QuestionId};
    use assessment_domain::question::{DifficultyLevel, GENERAL_TAG};
    use std::collections::HashSet;

    struct Retired(HashSet<QuestionId>);

    impl EligibilityOracle for Retired {
        fn is_eligible(&self, question_id: &QuestionId) -> bool {
            !self.0.contains(question_id)
        }
    }

    #[test]
    fn test_retired_and_inactive_are_ineligible() {
        let indicator = IndicatorId::new();
        let valid = Question::new(indicator, DifficultyLevel::Foundational);
        let retired = Question::new(indicator, DifficultyLevel::Foundational);
        let mut inactive = Question::new(indicator, DifficultyLevel::Foundational);
        inactive.active = false;

        let oracle = Retired(HashSet::from([retired.id]));
        let filter = EligibilityFilter::new(&oracle);

        assert!(filter.is_eligible(&valid));
        assert!(!filter.is_eligible(&retired));
        assert!(!filter.is_eligible(&inactive));
    }

    #[test]
    fn test_context_neutral_tags() {
        let indicator = IndicatorId::new();
        let q = Question::new(indicator, DifficultyLevel::Expert);
        assert!(is_context_neutral(&q));
        assert!(is_context_neutral(&q.clone().with_tag(GENERAL_TAG)));
        assert!(!is_context_neutral(&q.clone().with_tag("IT")));
        assert!(!is_context_neutral(&q.with_tag("general")));
    }
}
