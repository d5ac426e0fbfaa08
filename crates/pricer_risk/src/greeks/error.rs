//! Error types for Greek computation and pricing studies.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::lattice::LatticeError;
use thiserror::Error;

/// Risk-layer errors.
///
/// A bump that pushes spot or volatility out of its domain surfaces as
/// [`Market`](Self::Market); a failed re-price as [`Lattice`](Self::Lattice).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// Shift size is not a positive finite number.
    #[error("Invalid bump size '{name}': {value}")]
    InvalidBump {
        /// Name of the shift.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A study was given no points to evaluate.
    #[error("Empty {0} grid")]
    EmptyGrid(&'static str),

    /// Lattice construction or pricing failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Bumped market parameters are invalid.
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// Contract variation is invalid.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Reference closed form could not be evaluated.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

impl From<RiskError> for PricingError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Lattice(inner) => inner.into(),
            RiskError::Market(inner) => inner.into(),
            RiskError::Instrument(inner) => inner.into(),
            RiskError::Analytical(inner) => inner.into(),
            RiskError::InvalidBump { .. } | RiskError::EmptyGrid(_) => {
                PricingError::InvalidConfiguration(err.to_string())
            }
        }
    }
}
