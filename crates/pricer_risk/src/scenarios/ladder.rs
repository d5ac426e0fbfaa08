//! Greeks across a ladder of spot prices.

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;
use rayon::prelude::*;

use crate::greeks::{GreekEngine, RiskError, TreeGreeks};

/// Greeks at one spot of the ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LadderPoint {
    /// Spot of this rung.
    pub spot: f64,
    /// Price and Greeks at this spot.
    pub greeks: TreeGreeks,
}

/// Greeks at each spot with a default [`GreekEngine`] of `n_steps`.
///
/// # Errors
/// See [`spot_ladder_with_engine`].
pub fn spot_ladder(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
    spots: &[f64],
) -> Result<Vec<LadderPoint>, RiskError> {
    spot_ladder_with_engine(&GreekEngine::new(n_steps), market, contract, spots)
}

/// Greeks at each spot with the given engine.
///
/// # Errors
/// [`RiskError::EmptyGrid`] for an empty `spots`, [`RiskError::Market`] for
/// a non-positive spot, otherwise the first failing re-price.
pub fn spot_ladder_with_engine(
    engine: &GreekEngine,
    market: &MarketParameters,
    contract: &ContractTerms,
    spots: &[f64],
) -> Result<Vec<LadderPoint>, RiskError> {
    if spots.is_empty() {
        return Err(RiskError::EmptyGrid("spot"));
    }
    tracing::info!(points = spots.len(), n_steps = engine.n_steps(), "spot ladder");

    spots
        .par_iter()
        .map(|&spot| {
            let market = market.with_spot(spot)?;
            let greeks = engine.compute_all(&market, contract)?;
            Ok(LadderPoint { spot, greeks })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::MarketDataError;
    use pricer_core::types::Date;
    use pricer_models::instruments::{ExerciseStyle, OptionKind};

    fn inputs() -> (MarketParameters, ContractTerms) {
        let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
        let contract = ContractTerms::new(
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            100.0,
            OptionKind::Call,
            ExerciseStyle::European,
        )
        .unwrap();
        (market, contract)
    }

    #[test]
    fn test_delta_rises_with_spot() {
        let (market, contract) = inputs();
        let spots = [70.0, 100.0, 130.0];
        let ladder = spot_ladder(&market, &contract, 100, &spots).unwrap();

        assert_eq!(ladder.len(), 3);
        assert_eq!(ladder[1].spot, 100.0);
        assert!(ladder[0].greeks.delta < ladder[1].greeks.delta);
        assert!(ladder[1].greeks.delta < ladder[2].greeks.delta);
        assert!(ladder[0].greeks.price < ladder[2].greeks.price);
    }

    #[test]
    fn test_rung_matches_direct_computation() {
        let (market, contract) = inputs();
        let engine = GreekEngine::new(50);
        let ladder = spot_ladder_with_engine(&engine, &market, &contract, &[95.0]).unwrap();
        let direct = engine
            .compute_all(&market.with_spot(95.0).unwrap(), &contract)
            .unwrap();
        assert_eq!(ladder[0].greeks, direct);
    }

    #[test]
    fn test_invalid_spot() {
        let (market, contract) = inputs();
        assert!(matches!(
            spot_ladder(&market, &contract, 20, &[0.0]),
            Err(RiskError::Market(MarketDataError::InvalidSpot { .. }))
        ));
    }
}
