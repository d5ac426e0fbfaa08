//! Trinomial CLI - command line front end for the lattice pricer
//!
//! # Commands
//!
//! - `trinomial price` - Price with both traversals and the closed form
//! - `trinomial greeks` - Finite-difference delta, gamma, vega, volga, vanna
//! - `trinomial convergence` - Tree versus closed form across step counts
//! - `trinomial strikes` - Tree versus closed form across strikes
//! - `trinomial ladder` - Greeks across spot prices
//! - `trinomial check` - Structural self-checks of the lattice
//!
//! Inputs come from a TOML request (`--config`) and flags, flags taking
//! precedence. Logs go to stderr so that results on stdout stay parseable.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_request, InputArgs, LogLevel};
use output::OutputFormat;

/// Trinomial lattice option pricer
#[derive(Parser)]
#[command(name = "trinomial")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TRINOMIAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price with both traversals and the closed-form reference
    Price(InputArgs),

    /// Compute finite-difference Greeks
    Greeks(InputArgs),

    /// Compare tree and closed form across step counts
    Convergence {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated step counts
        #[arg(long, value_delimiter = ',')]
        grid: Vec<usize>,
    },

    /// Compare tree and closed form across strikes
    Strikes {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated strikes
        #[arg(long, value_delimiter = ',', required = true)]
        strikes: Vec<f64>,
    },

    /// Compute Greeks across spot prices
    Ladder {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated spot prices
        #[arg(long, value_delimiter = ',', required = true)]
        spots: Vec<f64>,
    },

    /// Check lattice structure for the request
    Check(InputArgs),
}

impl Commands {
    fn input(&self) -> &InputArgs {
        match self {
            Commands::Price(input) | Commands::Greeks(input) | Commands::Check(input) => input,
            Commands::Convergence { input, .. }
            | Commands::Strikes { input, .. }
            | Commands::Ladder { input, .. } => input,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let request = build_request(cli.command.input())?;

    let log_level = match cli.log_level.as_deref() {
        Some(level) => level.parse()?,
        None => request.log_level()?.unwrap_or_default(),
    };
    init_tracing(log_level);

    let request = request.resolve()?;
    tracing::debug!(
        spot = request.market.spot(),
        volatility = request.market.volatility(),
        maturity = %request.contract.maturity_date(),
        n_steps = request.n_steps,
        "Request loaded"
    );

    let format = cli.format;
    match &cli.command {
        Commands::Price(_) => commands::price::run(&request, format)?,
        Commands::Greeks(_) => commands::greeks::run(&request, format)?,
        Commands::Convergence { grid, .. } => commands::convergence::run(&request, grid, format)?,
        Commands::Strikes { strikes, .. } => commands::strikes::run(&request, strikes, format)?,
        Commands::Ladder { spots, .. } => commands::ladder::run(&request, spots, format)?,
        Commands::Check(_) => commands::check::run(&request, format)?,
    }
    Ok(())
}
