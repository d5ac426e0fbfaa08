//! Lattice construction settings.

use super::error::LatticeError;

/// Reach probability below which a node is pruned.
pub const DEFAULT_PRUNING_THRESHOLD: f64 = 1e-8;

/// Tolerance applied when range-checking calibrated probabilities.
pub const DEFAULT_CALIBRATION_TOLERANCE: f64 = 1e-9;

/// What the builder does when calibrated probabilities leave `[0, 1]`.
///
/// Probabilities are never clamped in either case. Out-of-range values show
/// up at the dividend step for deep low-price nodes when volatility and
/// horizon are large; see [`LatticeBuilder::build`](super::LatticeBuilder::build).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalibrationPolicy {
    /// Abort the build with [`LatticeError::CalibrationDomain`].
    #[default]
    Reject,
    /// Log a warning and keep the raw probabilities.
    Warn,
}

/// Settings for [`LatticeBuilder`](super::LatticeBuilder).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{CalibrationPolicy, LatticeConfig};
///
/// let config = LatticeConfig::default()
///     .with_pruning_threshold(1e-10)
///     .with_calibration_policy(CalibrationPolicy::Warn);
///
/// assert_eq!(config.pruning_threshold(), 1e-10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LatticeConfig {
    pruning_threshold: f64,
    calibration_tolerance: f64,
    calibration_policy: CalibrationPolicy,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            pruning_threshold: DEFAULT_PRUNING_THRESHOLD,
            calibration_tolerance: DEFAULT_CALIBRATION_TOLERANCE,
            calibration_policy: CalibrationPolicy::Reject,
        }
    }
}

impl LatticeConfig {
    /// Sets the pruning threshold. Zero disables pruning.
    #[inline]
    pub fn with_pruning_threshold(mut self, threshold: f64) -> Self {
        self.pruning_threshold = threshold;
        self
    }

    /// Disables pruning: every node is calibrated.
    #[inline]
    pub fn without_pruning(self) -> Self {
        self.with_pruning_threshold(0.0)
    }

    /// Sets the probability range tolerance.
    #[inline]
    pub fn with_calibration_tolerance(mut self, tolerance: f64) -> Self {
        self.calibration_tolerance = tolerance;
        self
    }

    /// Sets the out-of-range policy.
    #[inline]
    pub fn with_calibration_policy(mut self, policy: CalibrationPolicy) -> Self {
        self.calibration_policy = policy;
        self
    }

    /// Reach probability below which nodes are pruned.
    #[inline]
    pub fn pruning_threshold(&self) -> f64 {
        self.pruning_threshold
    }

    /// Probability range tolerance.
    #[inline]
    pub fn calibration_tolerance(&self) -> f64 {
        self.calibration_tolerance
    }

    /// Out-of-range policy.
    #[inline]
    pub fn calibration_policy(&self) -> CalibrationPolicy {
        self.calibration_policy
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidParameter`] if the threshold or the
    /// tolerance is negative or not finite.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !(self.pruning_threshold.is_finite() && self.pruning_threshold >= 0.0) {
            return Err(LatticeError::InvalidParameter {
                name: "pruning_threshold",
                value: self.pruning_threshold.to_string(),
            });
        }
        if !(self.calibration_tolerance.is_finite() && self.calibration_tolerance >= 0.0) {
            return Err(LatticeError::InvalidParameter {
                name: "calibration_tolerance",
                value: self.calibration_tolerance.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LatticeConfig::default();
        assert_eq!(config.pruning_threshold(), 1e-8);
        assert_eq!(config.calibration_tolerance(), 1e-9);
        assert_eq!(config.calibration_policy(), CalibrationPolicy::Reject);
    }

    #[test]
    fn test_without_pruning() {
        assert_eq!(LatticeConfig::default().without_pruning().pruning_threshold(), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let err = LatticeConfig::default()
            .with_pruning_threshold(-1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("pruning_threshold"));

        assert!(LatticeConfig::default()
            .with_calibration_tolerance(f64::NAN)
            .validate()
            .is_err());
    }
}
