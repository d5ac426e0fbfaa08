//! Transition probability calibration.
//!
//! Each non-pruned node branches to three successors `S_mid·α`, `S_mid` and
//! `S_mid/α`. The probabilities are solved in closed form so that the
//! one-step distribution matches the risk-neutral forward
//! `E = S·e^(r·dt) − D` and the variance `V = S²·e^(2r·dt)·(e^(σ²·dt) − 1)`:
//!
//! ```text
//! p_down = [ (V + E²)/S_mid² − 1 − (α + 1)(E/S_mid − 1) ] / [ (1 − α)(1/α² − 1) ]
//! p_up   = [ E/S_mid − 1 − (1/α − 1)·p_down ] / (α − 1)
//! p_mid  = 1 − p_up − p_down
//! ```
//!
//! Nothing here validates the result. The builder checks the range and
//! applies the configured [`CalibrationPolicy`](super::CalibrationPolicy).

/// Risk-neutral probabilities of the three branches of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionProbabilities {
    /// Probability of moving to `S_mid·α`.
    pub up: f64,
    /// Probability of moving to `S_mid`.
    pub mid: f64,
    /// Probability of moving to `S_mid/α`.
    pub down: f64,
}

impl TransitionProbabilities {
    /// Sum of the three probabilities.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.up + self.mid + self.down
    }

    /// Returns whether every probability lies in `[-tolerance, 1 + tolerance]`
    /// and the sum is within `tolerance` of one.
    pub fn is_within(&self, tolerance: f64) -> bool {
        let in_range = |p: f64| p >= -tolerance && p <= 1.0 + tolerance;
        in_range(self.up)
            && in_range(self.mid)
            && in_range(self.down)
            && (self.sum() - 1.0).abs() <= tolerance
    }
}

/// Solves the branch probabilities of a node at price `si` whose middle
/// successor sits at `s_mid`.
///
/// # Arguments
///
/// * `si` - Node price
/// * `s_mid` - Price of the middle successor
/// * `growth` - One-step growth factor `e^(r·dt)`
/// * `dividend` - Cash dividend detaching during this step (0 otherwise)
/// * `variance_factor` - `e^(σ²·dt) − 1`
/// * `alpha` - Spacing factor between adjacent levels
///
/// # Examples
///
/// ```
/// use pricer_pricing::lattice::compute_probabilities;
///
/// let dt: f64 = 1.0 / 100.0;
/// let sigma: f64 = 0.2;
/// let alpha = (sigma * (3.0 * dt).sqrt()).exp();
/// let growth = (0.05 * dt).exp();
/// let forward = 100.0 * growth;
///
/// let p = compute_probabilities(100.0, forward, growth, 0.0, (sigma * sigma * dt).exp_m1(), alpha);
/// assert!((p.sum() - 1.0).abs() < 1e-12);
/// assert!((p.up - 1.0 / 6.0).abs() < 0.01);
/// assert!((p.mid - 2.0 / 3.0).abs() < 0.01);
/// ```
pub fn compute_probabilities(
    si: f64,
    s_mid: f64,
    growth: f64,
    dividend: f64,
    variance_factor: f64,
    alpha: f64,
) -> TransitionProbabilities {
    let expectation = si * growth - dividend;
    let variance = si * si * growth * growth * variance_factor;

    let ratio = expectation / s_mid;
    let down = ((variance + expectation * expectation) / (s_mid * s_mid)
        - 1.0
        - (alpha + 1.0) * (ratio - 1.0))
        / ((1.0 - alpha) * (1.0 / (alpha * alpha) - 1.0));
    let up = (ratio - 1.0 - (1.0 / alpha - 1.0) * down) / (alpha - 1.0);

    TransitionProbabilities {
        up,
        mid: 1.0 - up - down,
        down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn params(sigma: f64, rate: f64, dt: f64) -> (f64, f64, f64) {
        let alpha = (sigma * (3.0 * dt).sqrt()).exp();
        let growth = (rate * dt).exp();
        let variance_factor = (sigma * sigma * dt).exp_m1();
        (alpha, growth, variance_factor)
    }

    #[test]
    fn test_matches_first_two_moments() {
        let (alpha, growth, vf) = params(0.25, 0.03, 0.01);
        let si = 100.0;
        let s_mid = si * growth;
        let p = compute_probabilities(si, s_mid, growth, 0.0, vf, alpha);

        let mean = p.up * s_mid * alpha + p.mid * s_mid + p.down * s_mid / alpha;
        assert_relative_eq!(mean, si * growth, max_relative = 1e-12);

        let second = p.up * (s_mid * alpha).powi(2)
            + p.mid * s_mid * s_mid
            + p.down * (s_mid / alpha).powi(2);
        let variance = si * si * growth * growth * vf;
        assert_relative_eq!(second - mean * mean, variance, max_relative = 1e-8);
    }

    #[test]
    fn test_dividend_lowers_expectation() {
        let (alpha, growth, vf) = params(0.2, 0.05, 0.02);
        let si = 100.0;
        let dividend = 2.0;
        let forward = si * growth - dividend;
        let p = compute_probabilities(si, forward, growth, dividend, vf, alpha);

        let mean = p.up * forward * alpha + p.mid * forward + p.down * forward / alpha;
        assert_relative_eq!(mean, forward, max_relative = 1e-12);
        assert!(p.is_within(1e-9));
    }

    #[test]
    fn test_is_within() {
        let ok = TransitionProbabilities {
            up: 0.2,
            mid: 0.6,
            down: 0.2,
        };
        assert!(ok.is_within(1e-9));

        let negative = TransitionProbabilities {
            up: -0.01,
            mid: 0.81,
            down: 0.2,
        };
        assert!(!negative.is_within(1e-9));
        assert!(negative.is_within(0.02));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_probabilities_normalised_when_mid_brackets_forward(
            sigma in 0.05f64..0.8,
            rate in -0.02f64..0.1,
            dt in 0.001f64..0.05,
            offset in -0.5f64..0.5,
        ) {
            let (alpha, growth, vf) = params(sigma, rate, dt);
            let si = 100.0;
            // mid within half a level of the forward, as the builder guarantees
            let s_mid = si * growth * alpha.powf(offset);
            let p = compute_probabilities(si, s_mid, growth, 0.0, vf, alpha);

            prop_assert!((p.sum() - 1.0).abs() < 1e-12);
            prop_assert!(p.is_within(1e-9), "{:?}", p);
        }
    }
}
