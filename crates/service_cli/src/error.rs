//! CLI error types

use pricer_models::analytical::AnalyticalError;
use pricer_pricing::lattice::LatticeError;
use pricer_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument combination or value not usable by the command
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Request could not be assembled
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Lattice construction or pricing failed
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Greek or study evaluation failed
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Reference price could not be evaluated
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// One or more self-checks failed
    #[error("{0} check(s) failed")]
    CheckFailed(usize),

    /// Writing results failed
    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
