//! Strikes command implementation

use pricer_risk::scenarios::{strike_sweep_with_config, StrikePoint};
use serde::Serialize;
use tracing::info;

use crate::config::ResolvedRequest;
use crate::output::{num, write_rows, OutputFormat, Row};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct StrikeRow {
    strike: f64,
    tree_price: f64,
    reference_price: f64,
    difference: f64,
}

impl From<&StrikePoint> for StrikeRow {
    fn from(point: &StrikePoint) -> Self {
        Self {
            strike: point.strike,
            tree_price: point.tree_price,
            reference_price: point.reference_price,
            difference: point.difference,
        }
    }
}

impl Row for StrikeRow {
    fn headers() -> &'static [&'static str] {
        &["strike", "tree", "reference", "tree - ref"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            num(self.strike),
            num(self.tree_price),
            num(self.reference_price),
            num(self.difference),
        ]
    }
}

/// Run the strikes command
pub fn run(request: &ResolvedRequest, strikes: &[f64], format: OutputFormat) -> Result<()> {
    if strikes.is_empty() {
        return Err(CliError::InvalidArgument(
            "--strikes needs at least one value".to_string(),
        ));
    }
    info!(points = strikes.len(), n_steps = request.n_steps, "Running strike sweep");

    let points = strike_sweep_with_config(
        &request.market,
        &request.contract,
        request.n_steps,
        strikes,
        request.lattice,
    )?;
    let rows: Vec<StrikeRow> = points.iter().map(StrikeRow::from).collect();
    write_rows(format, &rows)
}
