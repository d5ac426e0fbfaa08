//! Finite-difference shift sizes.

use super::error::RiskError;

/// Shift sizes used by [`GreekEngine`](super::GreekEngine).
///
/// Spot shifts are relative to the base spot; volatility shifts are
/// absolute. The defaults reproduce the desk conventions the tree Greeks
/// are compared against:
///
/// | Greek | Shift |
/// |-------|-------|
/// | Delta | `0.001·S` |
/// | Gamma | `0.05·S` |
/// | Vega  | `0.005` |
/// | Volga | `0.1` on top of the vega shift |
/// | Vanna | `0.001·S` and `0.05` |
///
/// # Examples
///
/// ```
/// use pricer_risk::greeks::BumpSizes;
///
/// let bumps = BumpSizes { vega: 0.01, ..BumpSizes::default() };
/// assert!(bumps.validate().is_ok());
/// assert_eq!(bumps.gamma_spot, 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BumpSizes {
    /// Relative spot shift for delta.
    pub delta_spot: f64,
    /// Relative spot shift for gamma.
    pub gamma_spot: f64,
    /// Absolute volatility shift for vega.
    pub vega: f64,
    /// Absolute volatility offset at which the second vega is taken.
    pub volga: f64,
    /// Relative spot shift for vanna.
    pub vanna_spot: f64,
    /// Absolute volatility shift for vanna.
    pub vanna_vol: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            delta_spot: 0.001,
            gamma_spot: 0.05,
            vega: 0.005,
            volga: 0.1,
            vanna_spot: 0.001,
            vanna_vol: 0.05,
        }
    }
}

impl BumpSizes {
    /// Checks that every shift is positive and finite.
    ///
    /// # Errors
    /// [`RiskError::InvalidBump`] naming the first offending shift.
    pub fn validate(&self) -> Result<(), RiskError> {
        let shifts = [
            ("delta_spot", self.delta_spot),
            ("gamma_spot", self.gamma_spot),
            ("vega", self.vega),
            ("volga", self.volga),
            ("vanna_spot", self.vanna_spot),
            ("vanna_vol", self.vanna_vol),
        ];
        for (name, value) in shifts {
            if !(value.is_finite() && value > 0.0) {
                return Err(RiskError::InvalidBump { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bumps = BumpSizes::default();
        assert_eq!(bumps.delta_spot, 0.001);
        assert_eq!(bumps.vega, 0.005);
        assert_eq!(bumps.volga, 0.1);
        assert_eq!(bumps.vanna_vol, 0.05);
        assert!(bumps.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_shift() {
        let bumps = BumpSizes {
            gamma_spot: 0.0,
            ..BumpSizes::default()
        };
        assert_eq!(
            bumps.validate(),
            Err(RiskError::InvalidBump {
                name: "gamma_spot",
                value: 0.0
            })
        );

        let bumps = BumpSizes {
            vanna_vol: f64::NAN,
            ..BumpSizes::default()
        };
        assert!(bumps.validate().is_err());
    }
}
