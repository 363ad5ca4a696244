//! Assessment Domain Types
//!
//! This crate provides the core domain model for assembling psychometric
//! assessments from a question bank and scoring completed sessions for team
//! fit.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers
//! - **question**: Question bank entries and the ordered difficulty scale
//! - **competency**: Competencies, behavioral indicators, O*NET / ESCO / Big Five mappings
//! - **answer**: Recorded answers (Likert, binary, continuous)
//! - **team**: Team profiles used for team-fit comparison
//! - **selection**: Distribution strategies and selection criteria
//! - **policy**: Tunable scoring constants
//! - **scoring**: Per-competency and overall scoring results
//! - **ports**: Collaborator interfaces the engines consume
//! - **errors**: Error taxonomy
//!
//! ## Usage
//!
//! ```rust
//! use assessment_domain::{
//!     question::{DifficultyLevel, Question},
//!     identifiers::IndicatorId,
//!     selection::DistributionStrategy,
//! };
//!
//! let question = Question::new(IndicatorId::new(), DifficultyLevel::Intermediate);
//! assert!(question.is_context_neutral());
//!
//! let strategy: DistributionStrategy = "priority_first".parse().unwrap();
//! assert_eq!(strategy, DistributionStrategy::PriorityFirst);
//! ```

#![warn(clippy::all)]

pub mod identifiers;
pub mod question;
pub mod competency;
pub mod answer;
pub mod team;
pub mod selection;
pub mod policy;
pub mod scoring;
pub mod ports;
pub mod errors;

// Re-export commonly used types
pub use identifiers::*;
pub use errors::{DomainError, DomainResult, SelectionError, ValidationError};
pub use question::{DifficultyLevel, Question, GENERAL_TAG};
pub use competency::{BehavioralIndicator, BigFiveTrait, Competency, OnetCode, StandardMappings};
pub use answer::{Answer, AnswerKind};
pub use team::{PersonalityProfile, TeamProfile};
pub use selection::{DistributionRequest, DistributionStrategy, SelectionCriteria};
pub use policy::{ClassificationThresholds, ScoringPolicy};
pub use scoring::{CompetencyScore, FitClassification, IndicatorScore, ScoringResult, TeamFitMetrics};
