//! Team-fit classification of competency scores.

use assessment_domain::policy::{ClassificationThresholds, ScoringPolicy};
use assessment_domain::scoring::{CompetencyScore, FitClassification};
use assessment_domain::team::TeamProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How many competencies landed in each band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub gap: usize,
    pub diversity: usize,
    pub saturation: usize,
}

impl ClassificationCounts {
    pub fn total(&self) -> usize {
        self.gap + self.diversity + self.saturation
    }

    fn ratio(&self, count: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    pub fn gap_ratio(&self) -> f64 {
        self.ratio(self.gap)
    }

    pub fn diversity_ratio(&self) -> f64 {
        self.ratio(self.diversity)
    }

    pub fn saturation_ratio(&self) -> f64 {
        self.ratio(self.saturation)
    }

    fn record(&mut self, classification: FitClassification) {
        match classification {
            FitClassification::Gap => self.gap += 1,
            FitClassification::Diversity => self.diversity += 1,
            FitClassification::Saturation => self.saturation += 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TeamFitClassifier {
    thresholds: ClassificationThresholds,
}

impl TeamFitClassifier {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Build from a policy snapshot, logging when thresholds fell back
    pub fn from_policy(policy: &ScoringPolicy) -> Self {
        let thresholds = policy.thresholds();
        if thresholds.fell_back {
            warn!(
                configured_saturation = policy.saturation_threshold,
                configured_diversity = policy.diversity_threshold,
                saturation = thresholds.saturation,
                diversity = thresholds.diversity,
                "Classification thresholds invalid, using fallback values"
            );
        }
        Self::new(thresholds)
    }

    pub fn thresholds(&self) -> ClassificationThresholds {
        self.thresholds
    }

    /// Lower bounds are inclusive: a ratio equal to a threshold takes the higher band
    pub fn classify_ratio(&self, ratio: f64) -> FitClassification {
        if ratio >= self.thresholds.saturation {
            FitClassification::Saturation
        } else if ratio >= self.thresholds.diversity {
            FitClassification::Diversity
        } else {
            FitClassification::Gap
        }
    }

    /// Classify each score in place and count the bands.
    ///
    /// The comparison ratio is the team's saturation for the competency. With
    /// no team profile, or no entry for the competency, the candidate's own
    /// achieved ratio is used instead.
    pub fn classify(&self, scores: &mut [CompetencyScore], team: Option<&TeamProfile>) -> ClassificationCounts {
        let mut counts = ClassificationCounts::default();

        for score in scores.iter_mut() {
            let ratio = team
                .and_then(|t| t.saturation_for(&score.competency_id))
                .unwrap_or_else(|| (score.percentage / 100.0).clamp(0.0, 1.0));
            let classification = self.classify_ratio(ratio);

            debug!(
                competency = %score.competency_id,
                ratio,
                %classification,
                "Classified competency"
            );

            score.comparison_ratio = Some(ratio);
            score.classification = Some(classification);
            counts.record(classification);
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_domain::identifiers::{CompetencyId, TeamId};
    use indexmap::IndexMap;

    fn score(percentage: f64) -> CompetencyScore {
        CompetencyScore {
            competency_id: CompetencyId::new(),
            name: "c".into(),
            sum: 0.0,
            answered: 1,
            percentage,
            weight: 1.0,
            big_five: None,
            indicators: IndexMap::new(),
            classification: None,
            comparison_ratio: None,
        }
    }

    fn classifier() -> TeamFitClassifier {
        TeamFitClassifier::from_policy(&ScoringPolicy::default())
    }

    #[test]
    fn test_boundaries_take_higher_band() {
        let c = classifier();
        assert_eq!(c.classify_ratio(0.75), FitClassification::Saturation);
        assert_eq!(c.classify_ratio(0.749), FitClassification::Diversity);
        assert_eq!(c.classify_ratio(0.5), FitClassification::Diversity);
        assert_eq!(c.classify_ratio(0.499), FitClassification::Gap);
        assert_eq!(c.classify_ratio(0.0), FitClassification::Gap);
    }

    #[test]
    fn test_team_profile_ratio_used() {
        let mut scores = vec![score(100.0), score(100.0), score(10.0)];
        let mut team = TeamProfile::new(TeamId::new(), 6);
        team.saturation.insert(scores[0].competency_id, 0.2);
        team.saturation.insert(scores[1].competency_id, 0.6);

        let counts = classifier().classify(&mut scores, Some(&team));
        assert_eq!(scores[0].classification, Some(FitClassification::Gap));
        assert_eq!(scores[1].classification, Some(FitClassification::Diversity));
        // No team entry, falls back to the candidate's own ratio
        assert_eq!(scores[2].classification, Some(FitClassification::Gap));
        assert_eq!(scores[2].comparison_ratio, Some(0.1));
        assert_eq!(counts, ClassificationCounts { gap: 2, diversity: 1, saturation: 0 });
    }

    #[test]
    fn test_self_referential_without_team() {
        let mut scores = vec![score(80.0), score(60.0)];
        let counts = classifier().classify(&mut scores, None);
        assert_eq!(counts.saturation, 1);
        assert_eq!(counts.diversity, 1);
        assert_eq!(counts.diversity_ratio(), 0.5);
    }

    #[test]
    fn test_empty_counts_have_zero_ratios() {
        let counts = ClassificationCounts::default();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.gap_ratio(), 0.0);
        assert_eq!(counts.saturation_ratio(), 0.0);
    }

    #[test]
    fn test_invalid_thresholds_fall_back() {
        let policy = ScoringPolicy {
            saturation_threshold: 0.0,
            diversity_threshold: 1.5,
            ..Default::default()
        };
        let c = TeamFitClassifier::from_policy(&policy);
        assert_eq!(c.thresholds().saturation, 0.75);
        assert_eq!(c.thresholds().diversity, 0.5);
    }
}
