//! Question selection engine
//!
//! Builds a bounded, duplicate-free list of eligible question ids:
//!
//! - `filters` - eligibility and context-neutrality checks
//! - `ranking` - preferred-difficulty ordering with random tie-breaks
//! - `indicator` / `graduated` - per-indicator selection
//! - `distribution` - budget allocation across indicators
//! - `competency` - indicator resolution for competencies
//! - `engine` - facade that owns the ports and records exposure
//!
//! Every randomized step takes its random source as an explicit `&mut R`.

mod competency;
mod distribution;
mod engine;
mod filters;
mod graduated;
mod indicator;
mod ranking;

pub use competency::{CompetencySelectionRequest, CompetencySelector};
pub use distribution::{allocate_weighted, DistributionPlanner};
pub use engine::SelectionEngine;
pub use filters::{is_context_neutral, is_eligible, EligibilityFilter};
pub use graduated::{band_quotas, GRADUATED_MIN_QUOTA};
pub use indicator::IndicatorSelector;
pub use ranking::rank_by_difficulty;
