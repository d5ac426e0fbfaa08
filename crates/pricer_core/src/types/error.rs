//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The root error every pricer layer converts into
//! - `DateError`: Errors from date construction and parsing
//!
//! Layer-specific enums (`MarketDataError`, `InstrumentError`, `LatticeError`)
//! carry richer context and implement `From<_> for PricingError`.

use thiserror::Error;

/// Categorised pricing errors.
///
/// All failures are deterministic functions of the inputs; none of them is
/// transient, so callers never retry.
///
/// # Variants
/// - `InvalidConfiguration`: Parameters outside their domain (steps, maturity, strike, volatility, ...)
/// - `UnrecognizedOptionKind`: Option kind token outside {Call, Put}
/// - `UnrecognizedExerciseStyle`: Exercise style token outside {European, American}
/// - `CalibrationDomain`: Transition probabilities left [0, 1]
/// - `NumericalInstability`: Traversal reached an inconsistent lattice state
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidConfiguration("n_steps must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid configuration: n_steps must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Option kind token not in the closed enumeration.
    #[error("Unrecognized option kind: {0}")]
    UnrecognizedOptionKind(String),

    /// Exercise style token not in the closed enumeration.
    #[error("Unrecognized exercise style: {0}")]
    UnrecognizedExerciseStyle(String),

    /// Calibrated probabilities outside [0, 1] beyond tolerance.
    #[error("Calibration domain error: {0}")]
    CalibrationDomain(String),

    /// Numerical or structural inconsistency during valuation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Date construction or parsing failure.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = PricingError::InvalidConfiguration("strike must be positive".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: strike must be positive"
        );
    }

    #[test]
    fn test_unrecognized_tokens_display() {
        let kind = PricingError::UnrecognizedOptionKind("straddle".to_string());
        let style = PricingError::UnrecognizedExerciseStyle("asian".to_string());
        assert_eq!(format!("{}", kind), "Unrecognized option kind: straddle");
        assert_eq!(format!("{}", style), "Unrecognized exercise style: asian");
    }

    #[test]
    fn test_date_error_is_transparent() {
        let err: PricingError = DateError::ParseError("bad input".to_string()).into();
        assert_eq!(format!("{}", err), "Date parse error: bad input");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::CalibrationDomain("p_down = -0.2".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
