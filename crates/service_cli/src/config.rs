//! Pricing request configuration
//!
//! A request is assembled from a TOML file and command-line flags, flags
//! taking precedence:
//!
//! ```toml
//! log_level = "info"
//!
//! [market]
//! spot = 100.0
//! rate = 0.05
//! volatility = 0.2
//! dividend = 3.0
//! dividend_date = "2025-07-02"
//!
//! [contract]
//! pricing_date = "2025-01-01"
//! maturity_date = "2026-01-01"
//! strike = 100.0
//! kind = "put"
//! style = "american"
//!
//! [lattice]
//! steps = 200
//! pruning_threshold = 1e-8
//! calibration_policy = "warn"
//!
//! [greeks]
//! vega = 0.005
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use pricer_core::market_data::{MarketDataError, MarketParameters};
use pricer_core::types::{Date, DateError};
use pricer_models::instruments::{ContractTerms, ExerciseStyle, InstrumentError, OptionKind};
use pricer_pricing::lattice::{CalibrationPolicy, LatticeConfig, LatticeError};
use pricer_risk::BumpSizes;
use serde::Deserialize;
use thiserror::Error;

/// Step count used when neither the file nor the flags give one
pub const DEFAULT_STEPS: usize = 200;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Market(#[from] MarketDataError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Log levels accepted by `--log-level` and `TRINOMIAL_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[market]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketSection {
    pub spot: Option<f64>,
    pub rate: Option<f64>,
    pub volatility: Option<f64>,
    pub dividend: Option<f64>,
    pub dividend_date: Option<String>,
}

/// `[contract]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractSection {
    pub pricing_date: Option<String>,
    pub maturity_date: Option<String>,
    pub strike: Option<f64>,
    pub kind: Option<String>,
    pub style: Option<String>,
}

/// `[lattice]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeSection {
    pub steps: Option<usize>,
    pub pruning_threshold: Option<f64>,
    pub calibration_tolerance: Option<f64>,
    pub calibration_policy: Option<CalibrationPolicy>,
}

/// Raw pricing request as read from a file, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingRequest {
    pub log_level: Option<String>,
    pub market: MarketSection,
    pub contract: ContractSection,
    pub lattice: LatticeSection,
    pub greeks: BumpSizes,
}

/// Validated inputs ready for pricing
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRequest {
    pub market: MarketParameters,
    pub contract: ContractTerms,
    pub n_steps: usize,
    pub lattice: LatticeConfig,
    pub bumps: BumpSizes,
}

/// Request flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Pricing request file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(long)]
    pub rate: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol")]
    pub volatility: Option<f64>,

    /// Cash dividend amount
    #[arg(long)]
    pub dividend: Option<f64>,

    /// Dividend ex-date (YYYY-MM-DD)
    #[arg(long)]
    pub dividend_date: Option<String>,

    /// Pricing date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub pricing_date: Option<String>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long = "maturity")]
    pub maturity_date: Option<String>,

    /// Strike price
    #[arg(long)]
    pub strike: Option<f64>,

    /// Option kind (call, put)
    #[arg(long)]
    pub kind: Option<String>,

    /// Exercise style (european/eu, american/us)
    #[arg(long)]
    pub style: Option<String>,

    /// Lattice step count
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Reach probability below which nodes are pruned (0 disables pruning)
    #[arg(long)]
    pub pruning_threshold: Option<f64>,

    /// Log out-of-range probabilities instead of failing
    ///
    /// Same as `calibration_policy = "warn"` in the `[lattice]` table. High
    /// volatility over long maturities with a large dividend can push deep
    /// low-price nodes out of range at the dividend step; without this flag
    /// such requests fail with a calibration error.
    #[arg(long)]
    pub warn_calibration: bool,
}

fn parse_date(value: &str) -> Result<Date, ConfigError> {
    Ok(Date::parse(value)?)
}

impl PricingRequest {
    /// Load a request from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse a request from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &InputArgs) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut self.market.spot, &cli.spot);
        set(&mut self.market.rate, &cli.rate);
        set(&mut self.market.volatility, &cli.volatility);
        set(&mut self.market.dividend, &cli.dividend);
        set(&mut self.market.dividend_date, &cli.dividend_date);
        set(&mut self.contract.pricing_date, &cli.pricing_date);
        set(&mut self.contract.maturity_date, &cli.maturity_date);
        set(&mut self.contract.strike, &cli.strike);
        set(&mut self.contract.kind, &cli.kind);
        set(&mut self.contract.style, &cli.style);
        set(&mut self.lattice.steps, &cli.steps);
        set(&mut self.lattice.pruning_threshold, &cli.pruning_threshold);
        if cli.warn_calibration {
            self.lattice.calibration_policy = Some(CalibrationPolicy::Warn);
        }
    }

    /// Log level requested by the file, if any
    pub fn log_level(&self) -> Result<Option<LogLevel>, ConfigError> {
        self.log_level.as_deref().map(LogLevel::from_str).transpose()
    }

    /// Validate and convert into pricing inputs
    pub fn resolve(&self) -> Result<ResolvedRequest, ConfigError> {
        let m = &self.market;
        let mut market = MarketParameters::new(
            m.spot.ok_or(ConfigError::MissingField("market.spot"))?,
            m.rate.ok_or(ConfigError::MissingField("market.rate"))?,
            m.volatility
                .ok_or(ConfigError::MissingField("market.volatility"))?,
        )?;
        match (m.dividend, m.dividend_date.as_deref()) {
            (Some(amount), Some(date)) if amount != 0.0 => {
                market = market.with_dividend(amount, parse_date(date)?)?;
            }
            (Some(amount), None) if amount != 0.0 => {
                return Err(ConfigError::MissingField("market.dividend_date"));
            }
            _ => {}
        }

        let c = &self.contract;
        let pricing_date = match c.pricing_date.as_deref() {
            Some(date) => parse_date(date)?,
            None => Date::today(),
        };
        let maturity_date = parse_date(
            c.maturity_date
                .as_deref()
                .ok_or(ConfigError::MissingField("contract.maturity_date"))?,
        )?;
        let kind = match c.kind.as_deref() {
            Some(token) => OptionKind::from_str(token)?,
            None => OptionKind::Call,
        };
        let style = match c.style.as_deref() {
            Some(token) => ExerciseStyle::from_str(token)?,
            None => ExerciseStyle::European,
        };
        let contract = ContractTerms::new(
            pricing_date,
            maturity_date,
            c.strike.ok_or(ConfigError::MissingField("contract.strike"))?,
            kind,
            style,
        )?;

        let l = &self.lattice;
        let mut lattice = LatticeConfig::default();
        if let Some(threshold) = l.pruning_threshold {
            lattice = lattice.with_pruning_threshold(threshold);
        }
        if let Some(tolerance) = l.calibration_tolerance {
            lattice = lattice.with_calibration_tolerance(tolerance);
        }
        if let Some(policy) = l.calibration_policy {
            lattice = lattice.with_calibration_policy(policy);
        }
        lattice.validate()?;

        Ok(ResolvedRequest {
            market,
            contract,
            n_steps: l.steps.unwrap_or(DEFAULT_STEPS),
            lattice,
            bumps: self.greeks,
        })
    }
}

/// Load the request file named by `cli`, if any, and apply the flags
pub fn build_request(cli: &InputArgs) -> Result<PricingRequest, ConfigError> {
    let mut request = match &cli.config {
        Some(path) => PricingRequest::from_file(path)?,
        None => PricingRequest::default(),
    };
    request.merge_with_cli(cli);
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        log_level = "debug"

        [market]
        spot = 100.0
        rate = 0.05
        volatility = 0.2
        dividend = 3.0
        dividend_date = "2025-07-02"

        [contract]
        pricing_date = "2025-01-01"
        maturity_date = "2026-01-01"
        strike = 95.0
        kind = "Put"
        style = "US"

        [lattice]
        steps = 120
        pruning_threshold = 0.0
        calibration_policy = "warn"

        [greeks]
        vega = 0.01
    "#;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_full_request() {
        let request = PricingRequest::from_toml(FULL).unwrap();
        assert_eq!(request.log_level().unwrap(), Some(LogLevel::Debug));

        let resolved = request.resolve().unwrap();
        assert_eq!(resolved.market.spot(), 100.0);
        assert_eq!(resolved.market.dividend_amount(), 3.0);
        assert_eq!(resolved.contract.strike(), 95.0);
        assert_eq!(resolved.contract.kind(), OptionKind::Put);
        assert_eq!(resolved.contract.style(), ExerciseStyle::American);
        assert_eq!(resolved.n_steps, 120);
        assert_eq!(resolved.lattice.pruning_threshold(), 0.0);
        assert_eq!(resolved.lattice.calibration_policy(), CalibrationPolicy::Warn);
        assert_eq!(resolved.bumps.vega, 0.01);
        assert_eq!(resolved.bumps.gamma_spot, 0.05);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut request = PricingRequest::from_toml(FULL).unwrap();
        request.merge_with_cli(&InputArgs {
            strike: Some(110.0),
            kind: Some("call".to_string()),
            steps: Some(50),
            ..Default::default()
        });

        let resolved = request.resolve().unwrap();
        assert_eq!(resolved.contract.strike(), 110.0);
        assert_eq!(resolved.contract.kind(), OptionKind::Call);
        assert_eq!(resolved.n_steps, 50);
        assert_eq!(resolved.market.volatility(), 0.2);
    }

    #[test]
    fn test_defaults_without_file() {
        let mut request = PricingRequest::default();
        request.merge_with_cli(&InputArgs {
            spot: Some(100.0),
            rate: Some(0.01),
            volatility: Some(0.3),
            strike: Some(100.0),
            pricing_date: Some("2025-01-01".to_string()),
            maturity_date: Some("2025-07-01".to_string()),
            ..Default::default()
        });

        let resolved = request.resolve().unwrap();
        assert_eq!(resolved.n_steps, DEFAULT_STEPS);
        assert_eq!(resolved.contract.kind(), OptionKind::Call);
        assert_eq!(resolved.contract.style(), ExerciseStyle::European);
        assert_eq!(resolved.lattice, LatticeConfig::default());
        assert_eq!(resolved.bumps, BumpSizes::default());
    }

    #[test]
    fn test_missing_fields() {
        let err = PricingRequest::default().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("market.spot")));

        let mut request = PricingRequest::from_toml(FULL).unwrap();
        request.market.dividend_date = None;
        assert!(matches!(
            request.resolve(),
            Err(ConfigError::MissingField("market.dividend_date"))
        ));
    }

    #[test]
    fn test_unknown_tokens_are_errors() {
        let mut request = PricingRequest::from_toml(FULL).unwrap();
        request.contract.kind = Some("straddle".to_string());
        assert!(matches!(
            request.resolve(),
            Err(ConfigError::Instrument(InstrumentError::UnrecognizedOptionKind(_)))
        ));

        let mut request = PricingRequest::from_toml(FULL).unwrap();
        request.contract.style = Some("bermudan".to_string());
        assert!(matches!(
            request.resolve(),
            Err(ConfigError::Instrument(InstrumentError::UnrecognizedExerciseStyle(_)))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PricingRequest::from_toml("[market]\nspots = 100.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_invalid_lattice_settings() {
        let mut request = PricingRequest::from_toml(FULL).unwrap();
        request.lattice.pruning_threshold = Some(-1.0);
        assert!(matches!(request.resolve(), Err(ConfigError::Lattice(_))));
    }
}
