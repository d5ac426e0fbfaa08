//! Option contract definitions.
//!
//! # Instrument Types
//!
//! - [`OptionKind`]: Call or Put, with payoff sign and intrinsic value
//! - [`ExerciseStyle`]: European or American
//! - [`ContractTerms`]: Dates, strike, kind and style of one option
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
//!
//! let contract = ContractTerms::new(
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     100.0,
//!     "put".parse::<OptionKind>().unwrap(),
//!     ExerciseStyle::American,
//! )
//! .unwrap();
//!
//! assert_eq!(contract.time_to_maturity(), 1.0);
//! assert_eq!(contract.intrinsic(90.0), 10.0);
//! ```

mod contract;
mod error;
mod exercise;
mod payoff;

pub use contract::ContractTerms;
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use payoff::OptionKind;
