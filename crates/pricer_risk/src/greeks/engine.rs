//! Bump-and-revalue Greek engine.
//!
//! Every scenario is an independent lattice build followed by an iterative
//! rollback. Scenarios of one request are evaluated with rayon and gathered
//! in request order, so results do not depend on thread scheduling.

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;
use pricer_pricing::backward::price_iterative;
use pricer_pricing::lattice::{build_lattice_with_config, LatticeConfig};
use rayon::prelude::*;

use super::bumps::BumpSizes;
use super::error::RiskError;
use super::result::TreeGreeks;

/// Spot and volatility at which one re-price is taken.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scenario {
    spot: f64,
    volatility: f64,
}

/// Finite-difference Greeks on the trinomial lattice.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketParameters;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
/// use pricer_risk::greeks::GreekEngine;
///
/// let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
/// let contract = ContractTerms::new(
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     100.0,
///     OptionKind::Put,
///     ExerciseStyle::American,
/// )
/// .unwrap();
///
/// let engine = GreekEngine::new(100);
/// let delta = engine.delta(&market, &contract).unwrap();
/// assert!(delta < 0.0 && delta > -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreekEngine {
    n_steps: usize,
    bumps: BumpSizes,
    config: LatticeConfig,
}

impl GreekEngine {
    /// Creates an engine re-pricing on `n_steps` lattices with default
    /// shifts and lattice settings.
    pub fn new(n_steps: usize) -> Self {
        Self {
            n_steps,
            bumps: BumpSizes::default(),
            config: LatticeConfig::default(),
        }
    }

    /// Replaces the shift sizes.
    pub fn with_bumps(mut self, bumps: BumpSizes) -> Self {
        self.bumps = bumps;
        self
    }

    /// Replaces the lattice settings used for every re-price.
    pub fn with_config(mut self, config: LatticeConfig) -> Self {
        self.config = config;
        self
    }

    /// Step count of every re-price.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Shift sizes.
    #[inline]
    pub fn bumps(&self) -> &BumpSizes {
        &self.bumps
    }

    /// Lattice settings.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Lattice price at the unbumped inputs.
    ///
    /// # Errors
    /// [`RiskError::Lattice`] if the lattice cannot be built or valued.
    pub fn price(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let lattice = build_lattice_with_config(market, contract, self.n_steps, self.config)?;
        Ok(price_iterative(&lattice, None, None)?)
    }

    /// Central difference in spot with shift `delta_spot·S`.
    ///
    /// # Errors
    /// Invalid shifts, a bumped spot leaving its domain, or a failed re-price.
    pub fn delta(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let h = self.bumps.delta_spot * s;
        let prices = self.revalue(market, contract, &[at(s + h, v), at(s - h, v)])?;
        Ok((prices[0] - prices[1]) / (2.0 * h))
    }

    /// Central second difference in spot with shift `gamma_spot·S`.
    ///
    /// # Errors
    /// See [`delta`](Self::delta).
    pub fn gamma(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let h = self.bumps.gamma_spot * s;
        let prices =
            self.revalue(market, contract, &[at(s + h, v), at(s - h, v), at(s, v)])?;
        Ok((prices[0] + prices[1] - 2.0 * prices[2]) / (h * h))
    }

    /// `f(σ + h) − f(σ − h)` with `h = vega`, left unscaled.
    ///
    /// # Errors
    /// See [`delta`](Self::delta).
    pub fn vega(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let h = self.bumps.vega;
        let prices = self.revalue(market, contract, &[at(s, v + h), at(s, v - h)])?;
        Ok(prices[0] - prices[1])
    }

    /// `vega(σ + volga) − vega(σ)`.
    ///
    /// # Errors
    /// See [`delta`](Self::delta).
    pub fn volga(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let (h, offset) = (self.bumps.vega, self.bumps.volga);
        let prices = self.revalue(
            market,
            contract,
            &[
                at(s, v + offset + h),
                at(s, v + offset - h),
                at(s, v + h),
                at(s, v - h),
            ],
        )?;
        Ok((prices[0] - prices[1]) - (prices[2] - prices[3]))
    }

    /// Four-corner mixed difference in spot and volatility.
    ///
    /// ```text
    /// (f(S+hS, σ+hV) − f(S+hS, σ−hV) − f(S−hS, σ+hV) + f(S−hS, σ−hV)) / (4·hS·hV)
    /// ```
    ///
    /// # Errors
    /// See [`delta`](Self::delta).
    pub fn vanna(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<f64, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let h_s = self.bumps.vanna_spot * s;
        let h_v = self.bumps.vanna_vol;
        let prices = self.revalue(
            market,
            contract,
            &[
                at(s + h_s, v + h_v),
                at(s + h_s, v - h_v),
                at(s - h_s, v + h_v),
                at(s - h_s, v - h_v),
            ],
        )?;
        Ok((prices[0] - prices[1] - prices[2] + prices[3]) / (4.0 * h_s * h_v))
    }

    /// Base price and all five Greeks from one parallel batch of re-prices.
    ///
    /// Each Greek equals what the corresponding single-Greek method returns.
    ///
    /// # Errors
    /// See [`delta`](Self::delta).
    pub fn compute_all(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<TreeGreeks, RiskError> {
        let (s, v) = (market.spot(), market.volatility());
        let b = &self.bumps;
        let h_d = b.delta_spot * s;
        let h_g = b.gamma_spot * s;
        let h_s = b.vanna_spot * s;

        let scenarios = [
            at(s, v),
            at(s + h_d, v),
            at(s - h_d, v),
            at(s + h_g, v),
            at(s - h_g, v),
            at(s, v + b.vega),
            at(s, v - b.vega),
            at(s, v + b.volga + b.vega),
            at(s, v + b.volga - b.vega),
            at(s + h_s, v + b.vanna_vol),
            at(s + h_s, v - b.vanna_vol),
            at(s - h_s, v + b.vanna_vol),
            at(s - h_s, v - b.vanna_vol),
        ];
        let p = self.revalue(market, contract, &scenarios)?;

        let vega = p[5] - p[6];
        let greeks = TreeGreeks {
            price: p[0],
            delta: (p[1] - p[2]) / (2.0 * h_d),
            gamma: (p[3] + p[4] - 2.0 * p[0]) / (h_g * h_g),
            vega,
            volga: (p[7] - p[8]) - vega,
            vanna: (p[9] - p[10] - p[11] + p[12]) / (4.0 * h_s * b.vanna_vol),
        };

        tracing::debug!(
            n_steps = self.n_steps,
            scenarios = scenarios.len(),
            price = greeks.price,
            delta = greeks.delta,
            "greeks computed"
        );
        Ok(greeks)
    }

    /// Re-prices every scenario in parallel, returning prices in input order.
    fn revalue(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
        scenarios: &[Scenario],
    ) -> Result<Vec<f64>, RiskError> {
        self.bumps.validate()?;
        scenarios
            .par_iter()
            .map(|scenario| {
                let bumped = market
                    .with_spot(scenario.spot)?
                    .with_volatility(scenario.volatility)?;
                self.price(&bumped, contract)
            })
            .collect()
    }
}

#[inline]
fn at(spot: f64, volatility: f64) -> Scenario {
    Scenario { spot, volatility }
}

/// Delta with default shifts and lattice settings.
///
/// # Errors
/// See [`GreekEngine::delta`].
pub fn delta(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<f64, RiskError> {
    GreekEngine::new(n_steps).delta(market, contract)
}

/// Gamma with default shifts and lattice settings.
///
/// # Errors
/// See [`GreekEngine::gamma`].
pub fn gamma(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<f64, RiskError> {
    GreekEngine::new(n_steps).gamma(market, contract)
}

/// Vega with default shifts and lattice settings.
///
/// # Errors
/// See [`GreekEngine::vega`].
pub fn vega(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<f64, RiskError> {
    GreekEngine::new(n_steps).vega(market, contract)
}

/// Volga with default shifts and lattice settings.
///
/// # Errors
/// See [`GreekEngine::volga`].
pub fn volga(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<f64, RiskError> {
    GreekEngine::new(n_steps).volga(market, contract)
}

/// Vanna with default shifts and lattice settings.
///
/// # Errors
/// See [`GreekEngine::vanna`].
pub fn vanna(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<f64, RiskError> {
    GreekEngine::new(n_steps).vanna(market, contract)
}
