//! # pricer_core: Foundation Layer for the Trinomial Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date` and ACT/365 year fractions (`types::time`)
//! - The error taxonomy root: `PricingError`, `DateError` (`types::error`)
//! - Immutable market inputs: `MarketParameters` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketParameters;
//! use pricer_core::types::{year_fraction, Date};
//!
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 12, 31).unwrap();
//! assert!((year_fraction(today, expiry) - 365.0 / 365.0).abs() < 1e-12);
//!
//! let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
//! assert_eq!(market.spot(), 100.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date` and `MarketParameters`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
