//! # Pricer Risk (L4: Application)
//!
//! Finite-difference Greeks and pricing studies on top of the trinomial
//! lattice engine.
//!
//! This crate provides:
//! - Bump-and-revalue delta, gamma, vega, volga and vanna
//! - Convergence of the lattice price against the closed form
//! - Strike sweeps and spot ladders
//! - Rayon-based parallel evaluation of independent re-prices
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  greeks/     - GreekEngine, BumpSizes,  │
//! │                TreeGreeks               │
//! │  scenarios/  - convergence, strikes,    │
//! │                spot ladder              │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Trinomial lattice, backward induction  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every re-price builds its own lattice, so scenarios share nothing and
//! run on the rayon pool. Results are gathered in input order.
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketParameters;
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
//! use pricer_risk::greeks::GreekEngine;
//!
//! let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
//! let contract = ContractTerms::new(
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     100.0,
//!     OptionKind::Call,
//!     ExerciseStyle::European,
//! )
//! .unwrap();
//!
//! let greeks = GreekEngine::new(100).compute_all(&market, &contract).unwrap();
//! assert!(greeks.delta > 0.5 && greeks.delta < 0.75);
//! assert!(greeks.gamma > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod greeks;
pub mod scenarios;

// Re-export commonly used types
pub use greeks::{BumpSizes, GreekEngine, RiskError, TreeGreeks};
pub use scenarios::{
    convergence_study, spot_ladder, strike_sweep, ConvergencePoint, LadderPoint, StrikePoint,
};
