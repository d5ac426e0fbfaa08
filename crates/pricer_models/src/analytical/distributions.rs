//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function, Hart's double-precision
//!   rational approximation (as arranged by West, 2005)
//! - `norm_pdf`: Probability density function
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail is below f64 resolution.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational fit and the continued fraction.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

const NUMERATOR: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const DENOMINATOR: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + lit::<T>(c))
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) for X ~ N(0, 1). Absolute error is around 1e-14
/// across the real line.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-14);
/// assert!((norm_cdf(1.96_f64) - 0.975_002_104_851_780).abs() < 1e-12);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let abs_x = x.abs();

    let lower_tail = if abs_x > lit(TAIL_CUTOFF) {
        T::zero()
    } else {
        let gauss = (-abs_x * abs_x / lit(2.0)).exp();
        if abs_x < lit(RATIONAL_LIMIT) {
            gauss * horner(&NUMERATOR, abs_x) / horner(&DENOMINATOR, abs_x)
        } else {
            let mut frac = abs_x + lit(0.65);
            for k in [4.0, 3.0, 2.0, 1.0] {
                frac = abs_x + lit::<T>(k) / frac;
            }
            gauss / frac / lit(SQRT_2PI)
        }
    };

    if x > T::zero() {
        T::one() - lower_tail
    } else {
        lower_tail
    }
}

/// Standard normal probability density φ(x) = exp(-x²/2) / sqrt(2π).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (-x * x / lit(2.0)).exp()
}
