//! Black-Scholes reference pricing for European options.
//!
//! Closed-form prices used to measure lattice convergence, with an optional
//! discrete cash dividend handled by the escrowed-dividend approximation:
//! the spot is replaced by `S_adj = S - D·e^(-r·t_div)` when the dividend
//! falls inside the option's life.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S_adj·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S_adj·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S_adj/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::market_data::MarketParameters;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::{ContractTerms, OptionKind};

/// Expiries at or below this are priced at intrinsic value.
const EXPIRY_EPSILON: f64 = 1e-10;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Black-Scholes model with an optional escrowed discrete dividend.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
    /// (amount, time in years)
    dividend: Option<(T, T)>,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model without dividend.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
            dividend: None,
        })
    }

    /// Attaches a discrete cash dividend `amount` paid at `time` years.
    ///
    /// The dividend only affects expiries `T` with `0 < time <= T`.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidDividend` if amount or time is negative
    /// - `AnalyticalError::DividendExceedsSpot` if `S - D·e^(-r·time) <= 0`
    pub fn with_dividend(self, amount: T, time: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();
        if !(amount >= zero && time >= zero) {
            return Err(AnalyticalError::InvalidDividend {
                amount: amount.to_f64().unwrap_or(f64::NAN),
                time: time.to_f64().unwrap_or(f64::NAN),
            });
        }

        let adjusted_spot = self.spot - amount * (-self.rate * time).exp();
        if !(adjusted_spot > zero) {
            return Err(AnalyticalError::DividendExceedsSpot {
                adjusted_spot: adjusted_spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            dividend: Some((amount, time)),
            ..self
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the attached dividend as `(amount, time)`.
    #[inline]
    pub fn dividend(&self) -> Option<(T, T)> {
        self.dividend
    }

    /// Spot net of the discounted dividend for an option expiring at `expiry`.
    ///
    /// Equals the plain spot when there is no dividend or it falls outside
    /// `(0, expiry]`.
    pub fn adjusted_spot(&self, expiry: T) -> T {
        match self.dividend {
            Some((amount, time)) if time > T::zero() && time <= expiry => {
                self.spot - amount * (-self.rate * time).exp()
            }
            _ => self.spot,
        }
    }

    /// d₁ = (ln(S_adj/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// At expiry returns ±100 (or 0 at the money) as a stand-in for ±∞.
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let spot = self.adjusted_spot(expiry);

        if expiry <= lit(EXPIRY_EPSILON) {
            let large: T = lit(100.0);
            return if spot > strike {
                large
            } else if spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let half: T = lit(0.5);
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        ((spot / strike).ln() + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(OptionKind::Call, strike, expiry)
    }

    /// European put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(OptionKind::Put, strike, expiry)
    }

    /// European price for either option kind.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionKind;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let call = bs.price(OptionKind::Call, 100.0, 1.0);
    /// assert!((call - 10.4506).abs() < 1e-4);
    /// ```
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        let spot = self.adjusted_spot(expiry);

        if expiry <= lit(EXPIRY_EPSILON) {
            let intrinsic = match kind {
                OptionKind::Call => spot - strike,
                OptionKind::Put => strike - spot,
            };
            return intrinsic.max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match kind {
            OptionKind::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionKind::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
        }
    }

    /// Delta (∂V/∂S): N(d₁) for a call, N(d₁) - 1 for a put.
    pub fn delta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            let spot = self.adjusted_spot(expiry);
            return match kind {
                OptionKind::Call if spot > strike => T::one(),
                OptionKind::Put if spot < strike => -T::one(),
                _ => T::zero(),
            };
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match kind {
            OptionKind::Call => n_d1,
            OptionKind::Put => n_d1 - T::one(),
        }
    }

    /// Gamma (∂²V/∂S²) = φ(d₁) / (S_adj·σ·√T), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return T::zero();
        }
        let spot = self.adjusted_spot(expiry);
        norm_pdf(self.d1(strike, expiry)) / (spot * self.volatility * expiry.sqrt())
    }

    /// Vega (∂V/∂σ) = S_adj·√T·φ(d₁), per unit of volatility.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return T::zero();
        }
        let spot = self.adjusted_spot(expiry);
        spot * expiry.sqrt() * norm_pdf(self.d1(strike, expiry))
    }
}

impl BlackScholes<f64> {
    /// Builds the reference model for a market and contract.
    ///
    /// The market dividend is attached when it is positive and its ex-date
    /// falls after the pricing date.
    ///
    /// # Errors
    /// Propagates validation failures from [`new`](Self::new) and
    /// [`with_dividend`](Self::with_dividend).
    pub fn from_inputs(
        market: &MarketParameters,
        contract: &ContractTerms,
    ) -> Result<Self, AnalyticalError> {
        let model = Self::new(market.spot(), market.rate(), market.volatility())?;
        match market.dividend_time(contract.pricing_date()) {
            Some(time) if time > 0.0 && market.dividend_amount() > 0.0 => {
                model.with_dividend(market.dividend_amount(), time)
            }
            _ => Ok(model),
        }
    }

    /// Prices `contract` as a European option under this model.
    pub fn price_contract(&self, contract: &ContractTerms) -> f64 {
        self.price(
            contract.kind(),
            contract.strike(),
            contract.time_to_maturity(),
        )
    }
}

/// Black-Scholes price with an escrowed discrete dividend.
///
/// `dividend` is paid at `dividend_time` years; pass `0.0` for both when
/// there is none.
///
/// # Errors
/// Returns an [`AnalyticalError`] for non-positive spot or volatility, or a
/// dividend that leaves no positive adjusted spot.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes;
/// use pricer_models::instruments::OptionKind;
///
/// let plain = black_scholes(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Put, 0.0, 0.0).unwrap();
/// let with_div = black_scholes(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Put, 3.0, 0.5).unwrap();
/// assert!(with_div > plain);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn black_scholes(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    kind: OptionKind,
    dividend: f64,
    dividend_time: f64,
) -> Result<f64, AnalyticalError> {
    let mut model = BlackScholes::new(spot, rate, volatility)?;
    if dividend > 0.0 {
        model = model.with_dividend(dividend, dividend_time)?;
    }
    Ok(model.price(kind, strike, expiry))
}
