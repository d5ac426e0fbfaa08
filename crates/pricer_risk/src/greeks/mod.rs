//! Finite-difference Greeks by full lattice re-pricing.
//!
//! - [`GreekEngine`]: delta, gamma, vega, volga and vanna for one contract
//! - [`BumpSizes`]: shift sizes, defaulting to the desk conventions
//! - [`TreeGreeks`]: base price plus all five Greeks
//!
//! Free functions [`delta`], [`gamma`], [`vega`], [`volga`] and [`vanna`]
//! run a default engine for a given step count.

mod bumps;
mod engine;
mod error;
mod result;

pub use bumps::BumpSizes;
pub use engine::{delta, gamma, vanna, vega, volga, GreekEngine};
pub use error::RiskError;
pub use result::TreeGreeks;
