//! Contract terms of a single vanilla option.

use pricer_core::types::{year_fraction, Date};

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::payoff::OptionKind;

/// Terms of one vanilla option contract.
///
/// Holds the pricing date, maturity date, strike, payoff kind and exercise
/// style. Construction validates `strike > 0` and `maturity >= pricing`.
///
/// The `with_*` methods return modified copies; they are how the Greek
/// engine and the strike sweep build shifted contracts without mutating
/// a shared instance.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
///
/// let pricing = Date::from_ymd(2025, 1, 1).unwrap();
/// let maturity = Date::from_ymd(2025, 7, 2).unwrap();
/// let call = ContractTerms::new(pricing, maturity, 100.0, OptionKind::Call, ExerciseStyle::European)
///     .unwrap();
///
/// let put = call.with_kind(OptionKind::Put);
/// assert_eq!(put.strike(), 100.0);
/// assert_eq!(put.kind(), OptionKind::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractTerms {
    pricing_date: Date,
    maturity_date: Date,
    strike: f64,
    kind: OptionKind,
    style: ExerciseStyle,
}

impl ContractTerms {
    /// Creates validated contract terms.
    ///
    /// # Errors
    ///
    /// - [`InstrumentError::InvalidStrike`] if `strike` is not finite and positive
    /// - [`InstrumentError::MaturityBeforePricing`] if `maturity_date < pricing_date`
    pub fn new(
        pricing_date: Date,
        maturity_date: Date,
        strike: f64,
        kind: OptionKind,
        style: ExerciseStyle,
    ) -> Result<Self, InstrumentError> {
        validate_strike(strike)?;
        if maturity_date < pricing_date {
            return Err(InstrumentError::MaturityBeforePricing {
                pricing: pricing_date,
                maturity: maturity_date,
            });
        }
        Ok(Self {
            pricing_date,
            maturity_date,
            strike,
            kind,
            style,
        })
    }

    /// Returns a copy with a different strike.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::InvalidStrike`] if `strike` is not positive.
    pub fn with_strike(&self, strike: f64) -> Result<Self, InstrumentError> {
        validate_strike(strike)?;
        Ok(Self { strike, ..*self })
    }

    /// Returns a copy with a different option kind.
    #[inline]
    pub fn with_kind(&self, kind: OptionKind) -> Self {
        Self { kind, ..*self }
    }

    /// Returns a copy with a different exercise style.
    #[inline]
    pub fn with_style(&self, style: ExerciseStyle) -> Self {
        Self { style, ..*self }
    }

    /// Pricing (valuation) date.
    #[inline]
    pub fn pricing_date(&self) -> Date {
        self.pricing_date
    }

    /// Maturity (expiry) date.
    #[inline]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Payoff kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Exercise style.
    #[inline]
    pub fn style(&self) -> ExerciseStyle {
        self.style
    }

    /// Time to maturity in years, ACT/365.
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        year_fraction(self.pricing_date, self.maturity_date)
    }

    /// Intrinsic value at `spot` for this contract's kind and strike.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.payoff(spot, self.strike)
    }
}

fn validate_strike(strike: f64) -> Result<(), InstrumentError> {
    if !strike.is_finite() || strike <= 0.0 {
        return Err(InstrumentError::InvalidStrike { strike });
    }
    Ok(())
}
