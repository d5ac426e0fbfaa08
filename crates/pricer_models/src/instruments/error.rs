//! Instrument error types.
//!
//! This module provides structured error handling for contract
//! construction and token parsing.

use pricer_core::types::{Date, PricingError};
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive
/// - `MaturityBeforePricing`: Maturity date precedes the pricing date
/// - `UnrecognizedOptionKind`: Kind token outside {Call, Put}
/// - `UnrecognizedExerciseStyle`: Style token outside {European, American}
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Maturity date is before the pricing date.
    #[error("Maturity {maturity} is before pricing date {pricing}")]
    MaturityBeforePricing {
        /// Pricing date
        pricing: Date,
        /// Maturity date
        maturity: Date,
    },

    /// Option kind token did not match Call or Put.
    #[error("Unrecognized option kind: '{0}' (expected Call or Put)")]
    UnrecognizedOptionKind(String),

    /// Exercise style token did not match European or American.
    #[error("Unrecognized exercise style: '{0}' (expected European or American)")]
    UnrecognizedExerciseStyle(String),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::UnrecognizedOptionKind(token) => {
                PricingError::UnrecognizedOptionKind(token)
            }
            InstrumentError::UnrecognizedExerciseStyle(token) => {
                PricingError::UnrecognizedExerciseStyle(token)
            }
            other => PricingError::InvalidConfiguration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: -100.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -100");
    }

    #[test]
    fn test_maturity_display() {
        let err = InstrumentError::MaturityBeforePricing {
            pricing: Date::from_ymd(2025, 1, 1).unwrap(),
            maturity: Date::from_ymd(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            format!("{}", err),
            "Maturity 2024-01-01 is before pricing date 2025-01-01"
        );
    }

    #[test]
    fn test_token_errors_keep_their_category() {
        let kind: PricingError = InstrumentError::UnrecognizedOptionKind("Straddle".into()).into();
        assert_eq!(kind, PricingError::UnrecognizedOptionKind("Straddle".into()));

        let style: PricingError =
            InstrumentError::UnrecognizedExerciseStyle("Bermudan".into()).into();
        assert_eq!(
            style,
            PricingError::UnrecognizedExerciseStyle("Bermudan".into())
        );
    }

    #[test]
    fn test_strike_maps_to_invalid_configuration() {
        let err: PricingError = InstrumentError::InvalidStrike { strike: 0.0 }.into();
        assert!(matches!(err, PricingError::InvalidConfiguration(_)));
    }
}
