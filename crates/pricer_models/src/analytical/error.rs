//! Error types for closed-form reference pricing.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidDividend`: Negative dividend or negative dividend time
/// - `DividendExceedsSpot`: Escrowed dividend leaves no positive spot
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid dividend amount or time.
    #[error("Invalid dividend: D = {amount} at t = {time}")]
    InvalidDividend {
        /// Dividend amount
        amount: f64,
        /// Dividend time in years
        time: f64,
    },

    /// Spot net of the discounted dividend is not positive.
    #[error("Dividend-adjusted spot is not positive: S_adj = {adjusted_spot}")]
    DividendExceedsSpot {
        /// Spot minus the discounted dividend
        adjusted_spot: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::DividendExceedsSpot { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidConfiguration(err.to_string()),
        }
    }
}
