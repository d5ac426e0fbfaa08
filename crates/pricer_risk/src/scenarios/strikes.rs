//! Tree versus reference across strikes.

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;
use pricer_pricing::backward::price_iterative;
use pricer_pricing::lattice::{build_lattice_with_config, LatticeConfig};
use rayon::prelude::*;

use super::reference_price;
use crate::greeks::RiskError;

/// One row of a strike sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikePoint {
    /// Strike of this row.
    pub strike: f64,
    /// Lattice price.
    pub tree_price: f64,
    /// Closed-form European price.
    pub reference_price: f64,
    /// `tree_price − reference_price`.
    pub difference: f64,
}

/// Prices `contract` at each strike on an `n_steps` lattice, default settings.
///
/// # Errors
/// [`RiskError::EmptyGrid`] for an empty `strikes`, [`RiskError::Instrument`]
/// for a non-positive strike, otherwise the first failing build.
pub fn strike_sweep(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
    strikes: &[f64],
) -> Result<Vec<StrikePoint>, RiskError> {
    strike_sweep_with_config(market, contract, n_steps, strikes, LatticeConfig::default())
}

/// Prices `contract` at each strike on an `n_steps` lattice.
///
/// The lattice does not depend on the strike, but each point rebuilds it
/// so that points stay independent.
///
/// # Errors
/// See [`strike_sweep`].
pub fn strike_sweep_with_config(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
    strikes: &[f64],
    config: LatticeConfig,
) -> Result<Vec<StrikePoint>, RiskError> {
    if strikes.is_empty() {
        return Err(RiskError::EmptyGrid("strike"));
    }
    tracing::info!(points = strikes.len(), n_steps, "strike sweep");

    strikes
        .par_iter()
        .map(|&strike| {
            let contract = contract.with_strike(strike)?;
            let lattice = build_lattice_with_config(market, &contract, n_steps, config)?;
            let tree_price = price_iterative(&lattice, None, None)?;
            let reference_price = reference_price(market, &contract)?;
            Ok(StrikePoint {
                strike,
                tree_price,
                reference_price,
                difference: tree_price - reference_price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Date;
    use pricer_models::instruments::{ExerciseStyle, InstrumentError, OptionKind};

    fn inputs(kind: OptionKind) -> (MarketParameters, ContractTerms) {
        let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
        let contract = ContractTerms::new(
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            100.0,
            kind,
            ExerciseStyle::European,
        )
        .unwrap();
        (market, contract)
    }

    #[test]
    fn test_sweep_tracks_reference() {
        let (market, contract) = inputs(OptionKind::Put);
        let strikes = [80.0, 90.0, 100.0, 110.0, 120.0];
        let points = strike_sweep(&market, &contract, 200, &strikes).unwrap();

        assert_eq!(points.len(), strikes.len());
        for (point, strike) in points.iter().zip(strikes) {
            assert_eq!(point.strike, strike);
            assert!(point.difference.abs() < 0.05, "{point:?}");
        }
        assert!(points.windows(2).all(|w| w[1].tree_price > w[0].tree_price));
    }

    #[test]
    fn test_invalid_strike() {
        let (market, contract) = inputs(OptionKind::Call);
        assert!(matches!(
            strike_sweep(&market, &contract, 20, &[100.0, -5.0]),
            Err(RiskError::Instrument(InstrumentError::InvalidStrike { .. }))
        ));
    }

    #[test]
    fn test_empty_grid() {
        let (market, contract) = inputs(OptionKind::Call);
        assert_eq!(
            strike_sweep(&market, &contract, 20, &[]),
            Err(RiskError::EmptyGrid("strike"))
        );
    }
}
