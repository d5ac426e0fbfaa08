//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper and the ACT/365 year fraction used for every tenor in the pricer
//! - `error`: Structured error types shared by all pricer layers
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`year_fraction`], [`DAYS_PER_YEAR`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, PricingError};
pub use time::{year_fraction, Date, DAYS_PER_YEAR};
