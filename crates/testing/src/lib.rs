//! Testing utilities for the assessment engine
//!
//! This crate provides:
//! - Fixtures that generate competency/indicator/question banks
//! - Builder patterns for individual domain values
//! - Mock implementations of the collaborator ports
//! - Property-based testing strategies
//!
//! # Examples
//!
//! ```
//! use assessment_testing::{builders::*, fixtures::*};
//! use assessment_domain::question::DifficultyLevel;
//!
//! let bank = create_test_bank(2, 3, 4);
//! assert_eq!(bank.questions.len(), 24);
//!
//! let question = QuestionBuilder::new(bank.indicators[0].id)
//!     .with_difficulty(DifficultyLevel::Expert)
//!     .with_tag("IT")
//!     .build();
//! assert!(!question.is_context_neutral());
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
