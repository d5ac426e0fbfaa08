//! # Pricer Pricing (Layer 3: Lattice Engine)
//!
//! Recombining trinomial lattice for European and American options with a
//! single discrete cash dividend.
//!
//! ## Modules
//!
//! - [`lattice`]: node arena, column-by-column builder, transition
//!   probability calibration and pruning of negligible branches
//! - [`backward`]: recursive and iterative backward induction producing a
//!   per-run [`backward::Valuation`]
//!
//! ## Pipeline
//!
//! ```text
//! MarketParameters ─┐
//!                   ├─> LatticeBuilder::build ─> Lattice ─> rollback_* ─> Valuation ─> price
//! ContractTerms ────┘
//! ```
//!
//! A [`lattice::Lattice`] is immutable after construction. Valuations live
//! outside the nodes, so one lattice can be priced under several kind and
//! style overrides, or by both traversals, without rebuilding.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketParameters;
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
//! use pricer_pricing::backward::price_iterative;
//! use pricer_pricing::lattice::build_lattice;
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
//! let lattice = build_lattice(&market, &contract, 200).unwrap();
//! let price = price_iterative(&lattice, None, None).unwrap();
//! assert!((price - 10.4506).abs() < 0.01);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod backward;
pub mod lattice;
