//! Convergence of the lattice price in the step count.

use std::time::Instant;

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;
use pricer_pricing::backward::price_iterative;
use pricer_pricing::lattice::{build_lattice_with_config, LatticeConfig};
use rayon::prelude::*;

use super::reference_price;
use crate::greeks::RiskError;

/// One row of a convergence study.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Lattice step count.
    pub n_steps: usize,
    /// Lattice price.
    pub tree_price: f64,
    /// Closed-form European price.
    pub reference_price: f64,
    /// `tree_price − reference_price`.
    pub error: f64,
    /// `error · n_steps`, roughly flat once the tree converges at rate `1/N`.
    pub scaled_error: f64,
    /// Lattice construction time in nanoseconds.
    pub build_time_ns: u64,
    /// Backward induction time in nanoseconds.
    pub price_time_ns: u64,
}

impl ConvergencePoint {
    /// Construction time in milliseconds.
    #[inline]
    pub fn build_time_ms(&self) -> f64 {
        self.build_time_ns as f64 / 1_000_000.0
    }

    /// Backward induction time in milliseconds.
    #[inline]
    pub fn price_time_ms(&self) -> f64 {
        self.price_time_ns as f64 / 1_000_000.0
    }
}

/// Tree versus reference price for each step count, default lattice settings.
///
/// # Errors
/// [`RiskError::EmptyGrid`] for an empty `steps`; otherwise the first
/// failing build or the reference evaluation error.
pub fn convergence_study(
    market: &MarketParameters,
    contract: &ContractTerms,
    steps: &[usize],
) -> Result<Vec<ConvergencePoint>, RiskError> {
    convergence_study_with_config(market, contract, steps, LatticeConfig::default())
}

/// Tree versus reference price for each step count.
///
/// # Errors
/// See [`convergence_study`].
pub fn convergence_study_with_config(
    market: &MarketParameters,
    contract: &ContractTerms,
    steps: &[usize],
    config: LatticeConfig,
) -> Result<Vec<ConvergencePoint>, RiskError> {
    if steps.is_empty() {
        return Err(RiskError::EmptyGrid("step"));
    }
    let reference = reference_price(market, contract)?;
    tracing::info!(points = steps.len(), reference, "convergence study");

    steps
        .par_iter()
        .map(|&n_steps| {
            let start = Instant::now();
            let lattice = build_lattice_with_config(market, contract, n_steps, config)?;
            let build_time_ns = start.elapsed().as_nanos() as u64;

            let start = Instant::now();
            let tree_price = price_iterative(&lattice, None, None)?;
            let price_time_ns = start.elapsed().as_nanos() as u64;

            let error = tree_price - reference;
            Ok(ConvergencePoint {
                n_steps,
                tree_price,
                reference_price: reference,
                error,
                scaled_error: error * n_steps as f64,
                build_time_ns,
                price_time_ns,
            })
        })
        .collect()
}
