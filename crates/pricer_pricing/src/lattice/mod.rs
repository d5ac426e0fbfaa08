//! Recombining trinomial lattice.
//!
//! This module provides:
//! - [`Lattice`]: node arena with per-column trunk handles
//! - [`LatticeBuilder`]: column-by-column construction with pruning
//! - [`compute_probabilities`]: closed-form branch calibration
//! - [`LatticeConfig`] and [`CalibrationPolicy`]: construction settings
//!
//! # Structure
//!
//! ```text
//!   step k          step k+1
//!                   S_mid·α   <- next_up
//!   S  ───────────> S_mid     <- next_mid (nearest level to S·e^(r·dt) − D)
//!                   S_mid/α   <- next_down
//! ```
//!
//! Levels of one column are chained by `neighbor_up`/`neighbor_down` and
//! differ by `α = exp(σ·√(3·dt))`. Successors are shared between nodes, so
//! column width grows at most by two per step, and less once low-probability
//! nodes are pruned.

mod builder;
mod calibration;
mod config;
mod error;
mod node;
mod tree;

pub use builder::{build_lattice, build_lattice_with_config, LatticeBuilder};
pub use calibration::{compute_probabilities, TransitionProbabilities};
pub use config::{
    CalibrationPolicy, LatticeConfig, DEFAULT_CALIBRATION_TOLERANCE, DEFAULT_PRUNING_THRESHOLD,
};
pub use error::LatticeError;
pub use node::{Branching, NodeId, TreeNode};
pub use tree::{Lattice, LatticeSummary};
