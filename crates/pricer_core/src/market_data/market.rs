//! Market parameters describing the underlying.

use super::error::MarketDataError;
use crate::types::{year_fraction, Date};

/// Immutable description of the underlying at the pricing date.
///
/// Holds the spot, the continuously-compounded risk-free rate, the annualised
/// volatility, and at most one discrete cash dividend with its ex-date.
/// Bumped copies for sensitivities are produced with [`with_spot`](Self::with_spot)
/// and [`with_volatility`](Self::with_volatility), which re-run validation.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketParameters;
///
/// let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
/// let bumped = market.with_spot(101.0).unwrap();
/// assert_eq!(bumped.spot(), 101.0);
/// assert_eq!(market.spot(), 100.0);
///
/// assert!(MarketParameters::new(100.0, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    spot: f64,
    rate: f64,
    volatility: f64,
    dividend_amount: f64,
    dividend_date: Option<Date>,
}

impl MarketParameters {
    /// Creates market parameters without a dividend.
    ///
    /// # Errors
    /// - `InvalidSpot` if `spot <= 0` or not finite
    /// - `InvalidRate` if `rate` is not finite
    /// - `InvalidVolatility` if `volatility <= 0` or not finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, MarketDataError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(MarketDataError::InvalidSpot { spot });
        }
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate { rate });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(MarketDataError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
            dividend_amount: 0.0,
            dividend_date: None,
        })
    }

    /// Attaches a single discrete cash dividend paid on `ex_date`.
    ///
    /// # Errors
    /// `InvalidDividend` if `amount < 0` or not finite.
    pub fn with_dividend(self, amount: f64, ex_date: Date) -> Result<Self, MarketDataError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(MarketDataError::InvalidDividend { amount });
        }
        Ok(Self {
            dividend_amount: amount,
            dividend_date: Some(ex_date),
            ..self
        })
    }

    /// Returns a copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, MarketDataError> {
        let base = Self::new(spot, self.rate, self.volatility)?;
        Ok(Self { spot: base.spot, ..*self })
    }

    /// Returns a copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, MarketDataError> {
        let base = Self::new(self.spot, self.rate, volatility)?;
        Ok(Self {
            volatility: base.volatility,
            ..*self
        })
    }

    /// Spot price of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Cash dividend amount (zero when no dividend is attached).
    #[inline]
    pub fn dividend_amount(&self) -> f64 {
        self.dividend_amount
    }

    /// Ex-dividend date, if any.
    #[inline]
    pub fn dividend_date(&self) -> Option<Date> {
        self.dividend_date
    }

    /// Time from `pricing_date` to the ex-dividend date in years (ACT/365).
    ///
    /// `None` when no dividend date is set.
    pub fn dividend_time(&self, pricing_date: Date) -> Option<f64> {
        self.dividend_date
            .map(|ex_date| year_fraction(pricing_date, ex_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let market = MarketParameters::new(100.0, -0.01, 0.25).unwrap();
        assert_eq!(market.spot(), 100.0);
        assert_eq!(market.rate(), -0.01);
        assert_eq!(market.volatility(), 0.25);
        assert_eq!(market.dividend_amount(), 0.0);
        assert!(market.dividend_date().is_none());
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert!(matches!(
            MarketParameters::new(0.0, 0.05, 0.2),
            Err(MarketDataError::InvalidSpot { .. })
        ));
        assert!(matches!(
            MarketParameters::new(100.0, f64::NAN, 0.2),
            Err(MarketDataError::InvalidRate { .. })
        ));
        assert!(matches!(
            MarketParameters::new(100.0, 0.05, -0.2),
            Err(MarketDataError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_with_dividend() {
        let ex_date = Date::from_ymd(2024, 7, 1).unwrap();
        let market = MarketParameters::new(100.0, 0.05, 0.2)
            .unwrap()
            .with_dividend(3.0, ex_date)
            .unwrap();
        assert_eq!(market.dividend_amount(), 3.0);
        assert_eq!(market.dividend_date(), Some(ex_date));

        let pricing = Date::from_ymd(2024, 1, 1).unwrap();
        let t = market.dividend_time(pricing).unwrap();
        assert!((t - 182.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_dividend_rejected() {
        let ex_date = Date::from_ymd(2024, 7, 1).unwrap();
        let result = MarketParameters::new(100.0, 0.05, 0.2)
            .unwrap()
            .with_dividend(-1.0, ex_date);
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidDividend { .. })
        ));
    }

    #[test]
    fn test_bumps_preserve_dividend() {
        let ex_date = Date::from_ymd(2024, 7, 1).unwrap();
        let market = MarketParameters::new(100.0, 0.05, 0.2)
            .unwrap()
            .with_dividend(1.0, ex_date)
            .unwrap();

        let spot_up = market.with_spot(105.0).unwrap();
        assert_eq!(spot_up.spot(), 105.0);
        assert_eq!(spot_up.dividend_amount(), 1.0);

        let vol_up = market.with_volatility(0.3).unwrap();
        assert_eq!(vol_up.volatility(), 0.3);
        assert_eq!(vol_up.dividend_date(), Some(ex_date));

        assert!(market.with_volatility(-0.01).is_err());
    }
}
