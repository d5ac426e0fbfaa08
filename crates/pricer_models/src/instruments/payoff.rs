//! Option kind and payoff evaluation.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Kind of vanilla option payoff.
///
/// The payoff is `max(0, (S - K) * sign)` with `sign = +1` for a call and
/// `-1` for a put. Lattice pricers use the same function for the terminal
/// payoff and for the intrinsic value checked at American exercise dates.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// assert_eq!(OptionKind::Call.payoff(110.0, 100.0), 10.0);
/// assert_eq!(OptionKind::Put.payoff(110.0, 100.0), 0.0);
/// assert_eq!("Put".parse::<OptionKind>().unwrap(), OptionKind::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Payoff multiplier: +1 for Call, -1 for Put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Exercise value `max(0, (spot - strike) * sign)`.
    #[inline]
    pub fn payoff(&self, spot: f64, strike: f64) -> f64 {
        ((spot - strike) * self.sign()).max(0.0)
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        }
    }
}

impl FromStr for OptionKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(InstrumentError::UnrecognizedOptionKind(s.to_string())),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_call_payoff() {
        assert_relative_eq!(OptionKind::Call.payoff(110.0, 100.0), 10.0);
        assert_eq!(OptionKind::Call.payoff(90.0, 100.0), 0.0);
        assert_eq!(OptionKind::Call.payoff(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_put_payoff() {
        assert_relative_eq!(OptionKind::Put.payoff(90.0, 100.0), 10.0);
        assert_eq!(OptionKind::Put.payoff(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_sign() {
        assert_eq!(OptionKind::Call.sign(), 1.0);
        assert_eq!(OptionKind::Put.sign(), -1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("call".parse(), Ok(OptionKind::Call));
        assert_eq!("CALL".parse(), Ok(OptionKind::Call));
        assert_eq!("Put".parse(), Ok(OptionKind::Put));
        assert_eq!(
            "digital".parse::<OptionKind>(),
            Err(InstrumentError::UnrecognizedOptionKind("digital".into()))
        );
    }

    #[test]
    fn test_payoff_never_negative() {
        for spot in [0.01, 50.0, 99.99, 100.0, 100.01, 500.0] {
            assert!(OptionKind::Call.payoff(spot, 100.0) >= 0.0);
            assert!(OptionKind::Put.payoff(spot, 100.0) >= 0.0);
        }
    }
}
