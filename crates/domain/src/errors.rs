//! Error types for the assessment domain.
//!
//! Only genuinely invalid input is an error here. Data gaps (empty pools,
//! missing team profiles, missing personality data) degrade to documented
//! fallbacks and never surface through these types.

use crate::identifiers::IndicatorId;

/// Top-level domain error type
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Question selection request errors
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Validation of reference data (standard codes, labels)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Selection(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Errors raised while planning or executing a question selection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Strategy name did not match any known distribution strategy
    #[error("Unknown distribution strategy: {0}")]
    UnknownStrategy(String),

    /// A per-indicator quota of zero can never select anything
    #[error("Per-indicator quota must be greater than zero")]
    ZeroQuota,

    /// Weight map entry that is not a finite number
    #[error("Invalid weight {weight} for indicator {indicator}")]
    InvalidWeight { indicator: IndicatorId, weight: f64 },
}

impl SelectionError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
            Self::ZeroQuota => "INVALID_QUOTA",
            Self::InvalidWeight { .. } => "INVALID_WEIGHT",
        }
    }
}

/// Validation errors for reference data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Field validation failed
    #[error("Field validation failed: {field} - {message}")]
    FieldValidation { field: String, message: String },

    /// O*NET-SOC code not in NN-NNNN.NN form
    #[error("Invalid O*NET code: {0}")]
    InvalidOnetCode(String),

    /// ESCO URI that does not parse as an absolute URL
    #[error("Invalid ESCO URI: {0}")]
    InvalidEscoUri(String),

    /// Unrecognised Big Five trait label
    #[error("Unknown Big Five trait: {0}")]
    UnknownTrait(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::from(SelectionError::UnknownStrategy("ROUND_ROBIN".into()));
        assert_eq!(err.error_code(), "UNKNOWN_STRATEGY");
        assert!(err.to_string().contains("ROUND_ROBIN"));

        let err = DomainError::from(ValidationError::InvalidOnetCode("abc".into()));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_invalid_weight_message() {
        let indicator = IndicatorId::new();
        let err = SelectionError::InvalidWeight {
            indicator,
            weight: -1.0,
        };
        assert!(err.to_string().contains(&indicator.to_string()));
    }
}
