//! Validation utilities for numeric configuration values.

/// Validate a number is within an inclusive range.
///
/// # Examples
///
/// ```
/// use assessment_common::validation::validate_range;
///
/// assert!(validate_range(0.5, 0.0, 1.0).is_ok());
/// assert!(validate_range(1.5, 0.0, 1.0).is_err());
/// ```
pub fn validate_range(value: f64, min: f64, max: f64) -> Result<(), String> {
    if value.is_nan() {
        return Err("Value must be a number".to_string());
    }

    if value < min {
        return Err(format!("Value must be at least {}", min));
    }

    if value > max {
        return Err(format!("Value cannot be greater than {}", max));
    }

    Ok(())
}

/// Validate a fraction in [0, 1].
pub fn validate_unit_interval(value: f64) -> Result<(), String> {
    validate_range(value, 0.0, 1.0)
}

/// Validate a finite, non-negative number.
pub fn validate_non_negative(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err("Value must be a finite number".to_string());
    }

    if value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5.0, 1.0, 10.0).is_ok());
        assert!(validate_range(1.0, 1.0, 10.0).is_ok());
        assert!(validate_range(10.0, 1.0, 10.0).is_ok());
        assert!(validate_range(0.0, 1.0, 10.0).is_err());
        assert!(validate_range(11.0, 1.0, 10.0).is_err());
        assert!(validate_range(f64::NAN, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_validate_unit_interval() {
        assert!(validate_unit_interval(0.0).is_ok());
        assert!(validate_unit_interval(1.0).is_ok());
        assert!(validate_unit_interval(-0.01).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(0.1).is_ok());
        assert!(validate_non_negative(-0.1).is_err());
        assert!(validate_non_negative(f64::INFINITY).is_err());
    }
}
