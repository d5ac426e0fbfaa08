//! Pricing studies over grids of steps, strikes and spots.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Studies                      │
//! ├──────────────────────────────────────────────┤
//! │  convergence_study - tree vs reference by N  │
//! │  strike_sweep      - tree vs reference by K  │
//! │  spot_ladder       - TreeGreeks by spot      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Grid points are independent and evaluated with rayon; every study
//! returns its points in input order.

mod convergence;
mod ladder;
mod strikes;

pub use convergence::{convergence_study, convergence_study_with_config, ConvergencePoint};
pub use ladder::{spot_ladder, spot_ladder_with_engine, LadderPoint};
pub use strikes::{strike_sweep, strike_sweep_with_config, StrikePoint};

use pricer_core::market_data::MarketParameters;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::ContractTerms;

use crate::greeks::RiskError;

/// European closed-form price of `contract`, used as the reference column.
fn reference_price(
    market: &MarketParameters,
    contract: &ContractTerms,
) -> Result<f64, RiskError> {
    Ok(BlackScholes::from_inputs(market, contract)?.price_contract(contract))
}
