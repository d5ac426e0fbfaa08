//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts and closed-form reference pricing.
//!
//! This crate provides:
//! - Contract terms for vanilla options: kind (Call/Put), exercise style
//!   (European/American), strike and dates
//! - Payoff and intrinsic value evaluation
//! - Black-Scholes reference prices with an escrowed discrete dividend,
//!   used to check lattice convergence
//!
//! ## Design Principles
//!
//! - **Closed enumerations** for option kind and exercise style; string tokens
//!   are parsed once and unknown tokens are errors
//! - **Validated construction**: invalid contracts cannot be represented
//! - **Generic analytical formulas** over `num_traits::Float`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
