//! Collaborator interfaces consumed by the selection and scoring engines.
//!
//! Implementations live outside the engine (catalog services, team
//! analytics, psychometric validity tracking). Every call is synchronous: the
//! calling layer is expected to have fetched its data before invoking the
//! engine.

use crate::competency::BehavioralIndicator;
use crate::identifiers::{CompetencyId, IndicatorId, QuestionId, TeamId};
use crate::policy::ScoringPolicy;
use crate::question::Question;
use crate::team::TeamProfile;
use std::collections::HashMap;

/// Source of questions
pub trait QuestionCatalog: Send + Sync {
    fn active_questions_for_indicator(&self, indicator_id: &IndicatorId) -> Vec<Question>;
}

/// Source of behavioral indicators
pub trait IndicatorCatalog: Send + Sync {
    fn indicators_for_competency(&self, competency_id: &CompetencyId) -> Vec<BehavioralIndicator>;

    fn indicators_for_competencies(&self, competency_ids: &[CompetencyId]) -> Vec<BehavioralIndicator> {
        competency_ids
            .iter()
            .flat_map(|id| self.indicators_for_competency(id))
            .collect()
    }
}

/// Psychometric validity state; retired questions are ineligible
pub trait EligibilityOracle: Send + Sync {
    fn is_eligible(&self, question_id: &QuestionId) -> bool;
}

/// Notified once per successful selection with the final id list
pub trait ExposureTracker: Send + Sync {
    fn record_exposure(&self, question_ids: &[QuestionId]);
}

/// Source of team composition snapshots
pub trait TeamProfileProvider: Send + Sync {
    fn profile_for(&self, team_id: &TeamId) -> Option<TeamProfile>;
}

impl TeamProfileProvider for HashMap<TeamId, TeamProfile> {
    fn profile_for(&self, team_id: &TeamId) -> Option<TeamProfile> {
        self.get(team_id).cloned()
    }
}

/// Source of the scoring configuration snapshot
pub trait ScoringConfigProvider: Send + Sync {
    fn snapshot(&self) -> ScoringPolicy;
}

impl ScoringConfigProvider for ScoringPolicy {
    fn snapshot(&self) -> ScoringPolicy {
        self.clone()
    }
}
