//! Team-fit scoring engine
//!
//! Provides answer normalization, competency aggregation, team-fit
//! classification, the balance multiplier and the pass decision.

mod aggregator;
mod balance;
mod classifier;
mod engine;
mod normalizer;
mod pass;
mod weights;

pub use aggregator::CompetencyAggregator;
pub use balance::{derive_candidate_personality, sigmoid, BalanceMultiplierCalculator};
pub use classifier::{ClassificationCounts, TeamFitClassifier};
pub use engine::{ScoringRequest, TeamFitScoringEngine, TeamFitScoringEngineBuilder};
pub use normalizer::normalize;
pub use pass::{PassDecision, PassDecisionEngine};
pub use weights::{competency_weight, weighted_percentage, BIG_FIVE_WEIGHT_BOOST, ESCO_WEIGHT_BOOST};
