//! Common utilities shared by the assessment crates.
//!
//! - Configuration loading and validation
//! - Telemetry setup
//! - Random source construction
//! - Numeric validation helpers

pub mod config;
pub mod random;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use config::{EngineConfig, SelectionConfig, TelemetryConfig};
pub use random::rng_from_seed;
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
