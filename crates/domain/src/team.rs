//! Team composition data used for team-fit scoring.

use crate::competency::BigFiveTrait;
use crate::identifiers::{CompetencyId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-trait Big Five scores on a 0-100 scale
pub type PersonalityProfile = BTreeMap<BigFiveTrait, f64>;

/// Snapshot of a team's composition.
///
/// Supplied wholesale by the profile provider; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub team_id: TeamId,
    pub member_count: u32,
    /// Fraction of assessed members already strong in each competency
    #[serde(default)]
    pub saturation: HashMap<CompetencyId, f64>,
    /// Team average per Big Five trait
    #[serde(default)]
    pub personality: PersonalityProfile,
}

impl TeamProfile {
    pub fn new(team_id: TeamId, member_count: u32) -> Self {
        Self {
            team_id,
            member_count,
            saturation: HashMap::new(),
            personality: PersonalityProfile::new(),
        }
    }

    /// Saturation ratio for a competency, clamped to [0, 1]
    pub fn saturation_for(&self, competency_id: &CompetencyId) -> Option<f64> {
        self.saturation
            .get(competency_id)
            .copied()
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, 1.0))
    }

    pub fn has_personality_data(&self) -> bool {
        !self.personality.is_empty()
    }
}
