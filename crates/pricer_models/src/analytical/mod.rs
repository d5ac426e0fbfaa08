//! Closed-form reference pricing.
//!
//! - Black-Scholes for European options, with an escrowed discrete dividend
//! - Analytic Delta, Gamma and Vega for validating finite-difference Greeks
//! - Standard normal CDF/PDF helpers
//!
//! All formulas are generic over `T: Float`.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{black_scholes, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
