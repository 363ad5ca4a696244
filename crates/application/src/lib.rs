//! Application layer for the assessment engine
//!
//! Two tightly coupled engines built on the domain model:
//!
//! - `selection` - assembles a bounded, balanced, duplicate-free set of
//!   eligible questions across competencies and indicators
//! - `scoring` - turns a completed session's answers into a team-fit score
//!   and pass decision
//! - `catalog` - in-memory implementations of the collaborator ports
//!
//! Both engines are synchronous and hold no mutable state between calls.

pub mod catalog;
pub mod scoring;
pub mod selection;

// Re-export commonly used types
pub use catalog::{AllEligible, InMemoryQuestionBank, NoOpExposureTracker, NoTeamProfiles};
pub use scoring::{ScoringRequest, TeamFitScoringEngine, TeamFitScoringEngineBuilder};
pub use selection::{CompetencySelectionRequest, SelectionEngine};

use assessment_domain::errors::{DomainError, SelectionError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
        }
    }
}

impl From<SelectionError> for ApplicationError {
    fn from(err: SelectionError) -> Self {
        ApplicationError::InvalidInput(err.to_string())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Selection(e) => e.into(),
            DomainError::Validation(e) => ApplicationError::ValidationFailed(e.to_string()),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
