//! Greek bundle returned by the engine.

use std::fmt;

/// Base price and finite-difference Greeks of one contract.
///
/// Vega and volga are raw price differences over the vega shift, so with
/// the default `0.005` shift they read as price change per vol point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeGreeks {
    /// Unbumped lattice price.
    pub price: f64,
    /// First derivative in spot.
    pub delta: f64,
    /// Second derivative in spot.
    pub gamma: f64,
    /// Price difference across the vega shift.
    pub vega: f64,
    /// Change in vega across the volga offset.
    pub volga: f64,
    /// Cross derivative in spot and volatility.
    pub vanna: f64,
}

impl fmt::Display for TreeGreeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price={:.6} delta={:.6} gamma={:.6} vega={:.6} volga={:.6} vanna={:.6}",
            self.price, self.delta, self.gamma, self.vega, self.volga, self.vanna
        )
    }
}
