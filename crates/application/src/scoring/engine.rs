//! Team-fit scoring engine - turns a completed session into a score and pass decision
//!
//! Pipeline: normalize and aggregate answers per competency, classify each
//! competency against the team, compute the weighted percentage, apply the
//! balance multiplier, then decide pass/fail against the adjusted threshold.

use super::aggregator::CompetencyAggregator;
use super::balance::{derive_candidate_personality, BalanceMultiplierCalculator};
use super::classifier::TeamFitClassifier;
use super::pass::PassDecisionEngine;
use super::weights::weighted_percentage;
use crate::catalog::NoTeamProfiles;
use assessment_common::EngineConfig;
use assessment_domain::answer::Answer;
use assessment_domain::competency::{BehavioralIndicator, Competency};
use assessment_domain::identifiers::TeamId;
use assessment_domain::ports::{ScoringConfigProvider, TeamProfileProvider};
use assessment_domain::question::Question;
use assessment_domain::scoring::{ScoringResult, TeamFitMetrics};
use assessment_domain::team::{PersonalityProfile, TeamProfile};
use assessment_domain::ScoringPolicy;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Everything needed to score one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub answers: Vec<Answer>,
    /// Questions the answers refer to
    pub questions: Vec<Question>,
    pub indicators: Vec<BehavioralIndicator>,
    /// Competencies in reporting order
    pub competencies: Vec<Competency>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    /// Explicit candidate Big Five profile; derived from mapped competencies when absent
    #[serde(default)]
    pub candidate_personality: Option<PersonalityProfile>,
}

impl ScoringRequest {
    pub fn new(
        answers: Vec<Answer>,
        questions: Vec<Question>,
        indicators: Vec<BehavioralIndicator>,
        competencies: Vec<Competency>,
    ) -> Self {
        Self {
            answers,
            questions,
            indicators,
            competencies,
            team_id: None,
            candidate_personality: None,
        }
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_candidate_personality(mut self, profile: PersonalityProfile) -> Self {
        self.candidate_personality = Some(profile);
        self
    }
}

/// The team-fit scoring engine
#[derive(Clone)]
pub struct TeamFitScoringEngine {
    config: Arc<dyn ScoringConfigProvider>,
    team_profiles: Arc<dyn TeamProfileProvider>,
}

impl TeamFitScoringEngine {
    /// Create a new engine builder
    pub fn builder() -> TeamFitScoringEngineBuilder {
        TeamFitScoringEngineBuilder::new()
    }

    pub fn new(
        config: Arc<dyn ScoringConfigProvider>,
        team_profiles: Arc<dyn TeamProfileProvider>,
    ) -> Self {
        Self {
            config,
            team_profiles,
        }
    }

    /// Current configuration snapshot
    pub fn policy(&self) -> ScoringPolicy {
        self.config.snapshot()
    }

    /// Score a completed session.
    ///
    /// Never fails: missing data degrades to documented fallbacks, and an
    /// empty or fully skipped session scores 0 and fails.
    #[instrument(
        skip(self, request),
        fields(answers = request.answers.len(), competencies = request.competencies.len())
    )]
    pub fn score(&self, request: &ScoringRequest) -> ScoringResult {
        let policy = self.config.snapshot();

        // Aggregate answers per competency
        let aggregator =
            CompetencyAggregator::new(&request.questions, &request.indicators, &request.competencies);
        let mut competency_scores = aggregator.aggregate(&request.answers);

        // Resolve team profile
        let team = self.resolve_team(request.team_id);

        // Classify against the team
        let classifier = TeamFitClassifier::from_policy(&policy);
        let counts = classifier.classify(&mut competency_scores, team.as_ref());

        // Weighted percentage before team fit
        let raw_percentage = weighted_percentage(&competency_scores);

        // Balance multiplier with optional personality term
        let personality_compatibility = team
            .as_ref()
            .filter(|t| t.has_personality_data())
            .and_then(|t| {
                let candidate = match &request.candidate_personality {
                    Some(profile) => profile.clone(),
                    None => derive_candidate_personality(&competency_scores),
                };
                BalanceMultiplierCalculator::personality_compatibility(&candidate, &t.personality)
            });
        let calculator = BalanceMultiplierCalculator::from_policy(&policy);
        let balance = BalanceMultiplierCalculator::balance(&counts);
        let multiplier = calculator.multiplier(balance, personality_compatibility);
        let percentage = (raw_percentage * multiplier).clamp(0.0, 100.0);

        // Pass decision
        let decision = PassDecisionEngine::from_policy(&policy).decide(
            percentage,
            &counts,
            team.as_ref().map(|t| t.member_count),
        );

        debug!(
            raw_percentage,
            balance,
            multiplier,
            compatibility = ?personality_compatibility,
            "Applied team-fit multiplier"
        );
        info!(
            percentage,
            passed = decision.passed,
            threshold = decision.threshold,
            gap = counts.gap,
            diversity = counts.diversity,
            saturation = counts.saturation,
            "Scoring complete"
        );

        ScoringResult {
            overall_score: percentage / 100.0,
            percentage,
            raw_percentage,
            passed: decision.passed,
            pass_threshold: decision.threshold,
            competency_scores,
            team_fit: TeamFitMetrics {
                gap_count: counts.gap,
                diversity_count: counts.diversity,
                saturation_count: counts.saturation,
                gap_ratio: counts.gap_ratio(),
                diversity_ratio: counts.diversity_ratio(),
                saturation_ratio: counts.saturation_ratio(),
                balance,
                multiplier,
                personality_compatibility,
                team_profile_used: team.is_some(),
                thresholds: classifier.thresholds(),
            },
            scored_at: Utc::now(),
        }
    }

    fn resolve_team(&self, team_id: Option<TeamId>) -> Option<TeamProfile> {
        let team_id = team_id?;
        let profile = self.team_profiles.profile_for(&team_id);
        if profile.is_none() {
            warn!(%team_id, "No team profile found, using self-referential scoring");
        }
        profile
    }
}

impl Default for TeamFitScoringEngine {
    fn default() -> Self {
        TeamFitScoringEngineBuilder::new().build()
    }
}

/// Builder for [`TeamFitScoringEngine`]
#[derive(Default)]
pub struct TeamFitScoringEngineBuilder {
    policy: ScoringPolicy,
    config: Option<Arc<dyn ScoringConfigProvider>>,
    team_profiles: Option<Arc<dyn TeamProfileProvider>>,
}

impl TeamFitScoringEngineBuilder {
    /// Create a new builder with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the scoring policy from a loaded engine configuration
    pub fn from_config(mut self, config: &EngineConfig) -> Self {
        self.policy = config.scoring.clone();
        self
    }

    /// Set the whole scoring policy
    pub fn policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read the policy from a live provider instead of a fixed snapshot
    pub fn config_provider(mut self, provider: Arc<dyn ScoringConfigProvider>) -> Self {
        self.config = Some(provider);
        self
    }

    /// Set the team profile provider
    pub fn team_profiles(mut self, provider: Arc<dyn TeamProfileProvider>) -> Self {
        self.team_profiles = Some(provider);
        self
    }

    /// Set the SATURATION and DIVERSITY lower bounds
    pub fn classification_thresholds(mut self, saturation: f64, diversity: f64) -> Self {
        self.policy.saturation_threshold = saturation;
        self.policy.diversity_threshold = diversity;
        self
    }

    /// Set the multiplier range ends and sigmoid steepness
    pub fn balance(mut self, penalty: f64, bonus: f64, steepness: f64) -> Self {
        self.policy.balance_penalty = penalty;
        self.policy.balance_bonus = bonus;
        self.policy.sigmoid_steepness = steepness;
        self
    }

    pub fn personality_weight(mut self, weight: f64) -> Self {
        self.policy.personality_weight = weight;
        self
    }

    /// Set the base pass threshold
    pub fn pass_threshold(mut self, threshold: f64) -> Self {
        self.policy.pass_threshold = threshold;
        self
    }

    pub fn min_diversity_ratio(mut self, ratio: f64) -> Self {
        self.policy.min_diversity_ratio = ratio;
        self
    }

    /// Build the engine
    pub fn build(self) -> TeamFitScoringEngine {
        let config = self
            .config
            .unwrap_or_else(|| Arc::new(self.policy) as Arc<dyn ScoringConfigProvider>);
        let team_profiles = self
            .team_profiles
            .unwrap_or_else(|| Arc::new(NoTeamProfiles) as Arc<dyn TeamProfileProvider>);
        TeamFitScoringEngine::new(config, team_profiles)
    }
}
