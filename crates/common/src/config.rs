//! Configuration management for the assessment engine.
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. `config/default.toml` (if exists)
//! 3. `config/{ASSESSMENT_ENV}.toml` (if exists)
//! 4. Environment variables, e.g. `ASSESSMENT__SCORING__PASS_THRESHOLD=0.65`
//!
//! ## Example Configuration
//!
//! ```toml
//! [selection]
//! default_strategy = "WEIGHTED"
//! per_indicator_quota = 4
//! graduated = true
//!
//! [scoring]
//! saturation_threshold = 0.75
//! diversity_threshold = 0.5
//! pass_threshold = 0.6
//!
//! [telemetry]
//! log_level = "debug"
//! json_logging = true
//! ```

use crate::validation::{validate_non_negative, validate_range, validate_unit_interval};
use anyhow::{Context, Result};
use assessment_domain::policy::ScoringPolicy;
use assessment_domain::question::DifficultyLevel;
use assessment_domain::selection::{DistributionStrategy, SelectionCriteria};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Question selection defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub default_strategy: DistributionStrategy,
    /// Per-indicator cap for WATERFALL and PRIORITY_FIRST
    pub per_indicator_quota: Option<usize>,
    pub graduated: bool,
    pub universal_baseline: bool,
    /// Fixed seed for reproducible selection; entropy-seeded when absent
    pub random_seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_strategy: DistributionStrategy::Waterfall,
            per_indicator_quota: None,
            graduated: false,
            universal_baseline: false,
            random_seed: None,
        }
    }
}

impl SelectionConfig {
    /// Selection criteria carrying the configured toggles
    pub fn criteria(&self, preferred_difficulty: Option<DifficultyLevel>) -> SelectionCriteria {
        SelectionCriteria {
            preferred_difficulty,
            universal_baseline: self.universal_baseline,
            graduated: self.graduated,
        }
    }

    /// Random source honoring `random_seed`
    pub fn rng(&self) -> StdRng {
        crate::random::rng_from_seed(self.random_seed)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name for tracing
    pub service_name: String,
    /// Enable JSON logging format
    pub json_logging: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "assessment-engine".to_string(),
            json_logging: false,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from files and environment variables.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use assessment_common::config::EngineConfig;
    ///
    /// let config = EngineConfig::load().expect("Failed to load configuration");
    /// println!("Pass threshold: {}", config.scoring.pass_threshold);
    /// ```
    pub fn load() -> Result<Self> {
        let env = std::env::var("ASSESSMENT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("ASSESSMENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let engine_config: EngineConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        engine_config.validate()?;

        Ok(engine_config)
    }

    /// Load configuration from an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let engine_config: EngineConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        engine_config.validate()?;

        Ok(engine_config)
    }

    /// Validate the configuration.
    ///
    /// Classification thresholds are deliberately not checked here; unusable
    /// values fall back to defaults when read.
    pub fn validate(&self) -> Result<()> {
        if self.selection.per_indicator_quota == Some(0) {
            anyhow::bail!("Per-indicator quota must be greater than 0");
        }

        let scoring = &self.scoring;

        if scoring.balance_penalty >= scoring.balance_bonus {
            anyhow::bail!(
                "Balance penalty ({}) must be below balance bonus ({})",
                scoring.balance_penalty,
                scoring.balance_bonus
            );
        }

        if !(scoring.sigmoid_steepness.is_finite() && scoring.sigmoid_steepness > 0.0) {
            anyhow::bail!("Sigmoid steepness must be a positive number");
        }

        validate_unit_interval(scoring.pass_threshold)
            .map_err(|e| anyhow::anyhow!("scoring.pass_threshold: {}", e))?;
        if scoring.pass_threshold == 0.0 {
            anyhow::bail!("scoring.pass_threshold must be greater than 0");
        }

        validate_unit_interval(scoring.threshold_floor)
            .map_err(|e| anyhow::anyhow!("scoring.threshold_floor: {}", e))?;
        if scoring.threshold_floor > scoring.pass_threshold {
            anyhow::bail!(
                "Threshold floor ({}) cannot exceed the base pass threshold ({})",
                scoring.threshold_floor,
                scoring.pass_threshold
            );
        }

        for (name, value) in [
            ("scoring.personality_weight", scoring.personality_weight),
            ("scoring.small_team_adjustment", scoring.small_team_adjustment),
            ("scoring.severe_gap_adjustment", scoring.severe_gap_adjustment),
        ] {
            validate_non_negative(value).map_err(|e| anyhow::anyhow!("{}: {}", name, e))?;
        }

        for (name, value) in [
            ("scoring.severe_gap_ratio", scoring.severe_gap_ratio),
            ("scoring.min_diversity_ratio", scoring.min_diversity_ratio),
        ] {
            validate_range(value, 0.0, 1.0).map_err(|e| anyhow::anyhow!("{}: {}", name, e))?;
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}
