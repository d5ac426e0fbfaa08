//! Market data error types.

use crate::types::PricingError;
use thiserror::Error;

/// Market parameter validation errors.
///
/// # Variants
///
/// - `InvalidSpot`: Non-positive or non-finite spot
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `InvalidRate`: Non-finite interest rate
/// - `InvalidDividend`: Negative or non-finite dividend amount
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("-0.2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Spot price must be strictly positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Volatility must be strictly positive.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Interest rate must be finite.
    #[error("Invalid interest rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Dividend amount must be non-negative.
    #[error("Invalid dividend amount: D = {amount}")]
    InvalidDividend {
        /// The invalid dividend amount
        amount: f64,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidConfiguration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", MarketDataError::InvalidSpot { spot: 0.0 }),
            "Invalid spot price: S = 0"
        );
        assert_eq!(
            format!("{}", MarketDataError::InvalidDividend { amount: -1.5 }),
            "Invalid dividend amount: D = -1.5"
        );
    }

    #[test]
    fn test_converts_to_invalid_configuration() {
        let err: PricingError = MarketDataError::InvalidVolatility { volatility: 0.0 }.into();
        match err {
            PricingError::InvalidConfiguration(msg) => assert!(msg.contains("volatility")),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }
}
