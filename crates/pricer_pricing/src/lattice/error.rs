//! Error types for lattice construction and backward induction.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::node::NodeId;

/// Lattice errors.
///
/// Construction errors are raised before any node is created, except
/// [`CalibrationDomain`](Self::CalibrationDomain) and
/// [`NonPositiveForward`](Self::NonPositiveForward) which are detected
/// while a column is being built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Step count must be at least one.
    #[error("Invalid step count {0}: must be at least 1")]
    InvalidStepCount(usize),

    /// Time to maturity must be positive.
    #[error("Non-positive time to maturity: T = {0}")]
    NonPositiveMaturity(f64),

    /// Invalid configuration parameter.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// Calibrated probabilities fell outside `[0, 1]` beyond tolerance.
    #[error(
        "Probabilities out of range at step {step}, S = {price}: \
         p_up = {p_up}, p_mid = {p_mid}, p_down = {p_down}"
    )]
    CalibrationDomain {
        /// Column of the offending node.
        step: usize,
        /// Price of the offending node.
        price: f64,
        /// Up probability.
        p_up: f64,
        /// Middle probability.
        p_mid: f64,
        /// Down probability.
        p_down: f64,
    },

    /// The dividend exceeds the grown price of a node.
    #[error("Non-positive forward {forward} at step {step}, S = {price}")]
    NonPositiveForward {
        /// Column of the offending node.
        step: usize,
        /// Price of the offending node.
        price: f64,
        /// Forward net of dividend.
        forward: f64,
    },

    /// Backward induction read a node that had not been valued.
    #[error("Node {0} read before it was valued")]
    UnvaluedNode(NodeId),

    /// A non-terminal node lacks a successor link.
    #[error("Node {0} has no successor link")]
    MissingLink(NodeId),
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::CalibrationDomain { .. } => {
                PricingError::CalibrationDomain(err.to_string())
            }
            LatticeError::NonPositiveForward { .. }
            | LatticeError::UnvaluedNode(_)
            | LatticeError::MissingLink(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
            LatticeError::InvalidStepCount(_)
            | LatticeError::NonPositiveMaturity(_)
            | LatticeError::InvalidParameter { .. } => {
                PricingError::InvalidConfiguration(err.to_string())
            }
        }
    }
}
