//! Market inputs for lattice pricing.
//!
//! # Components
//!
//! - [`market`]: Immutable `MarketParameters` (spot, rate, volatility, one discrete dividend)
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::MarketParameters;
//! use pricer_core::types::Date;
//!
//! let ex_date = Date::from_ymd(2024, 6, 1).unwrap();
//! let market = MarketParameters::new(100.0, 0.05, 0.2)
//!     .unwrap()
//!     .with_dividend(2.0, ex_date)
//!     .unwrap();
//! assert_eq!(market.dividend_amount(), 2.0);
//! ```

pub mod error;
pub mod market;

pub use error::MarketDataError;
pub use market::MarketParameters;
