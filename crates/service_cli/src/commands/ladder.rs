//! Ladder command implementation
//!
//! Full Greek set at each spot of a ladder.

use pricer_risk::scenarios::{spot_ladder_with_engine, LadderPoint};
use serde::Serialize;
use tracing::info;

use super::engine;
use crate::config::ResolvedRequest;
use crate::output::{num, write_rows, OutputFormat, Row};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct LadderRow {
    spot: f64,
    price: f64,
    delta: f64,
    gamma: f64,
    vega: f64,
    volga: f64,
    vanna: f64,
}

impl From<&LadderPoint> for LadderRow {
    fn from(point: &LadderPoint) -> Self {
        let g = &point.greeks;
        Self {
            spot: point.spot,
            price: g.price,
            delta: g.delta,
            gamma: g.gamma,
            vega: g.vega,
            volga: g.volga,
            vanna: g.vanna,
        }
    }
}

impl Row for LadderRow {
    fn headers() -> &'static [&'static str] {
        &["spot", "price", "delta", "gamma", "vega", "volga", "vanna"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            num(self.spot),
            num(self.price),
            num(self.delta),
            num(self.gamma),
            num(self.vega),
            num(self.volga),
            num(self.vanna),
        ]
    }
}

/// Run the ladder command
pub fn run(request: &ResolvedRequest, spots: &[f64], format: OutputFormat) -> Result<()> {
    if spots.is_empty() {
        return Err(CliError::InvalidArgument(
            "--spots needs at least one value".to_string(),
        ));
    }
    info!(points = spots.len(), n_steps = request.n_steps, "Running spot ladder");

    let points =
        spot_ladder_with_engine(&engine(request), &request.market, &request.contract, spots)?;
    let rows: Vec<LadderRow> = points.iter().map(LadderRow::from).collect();
    write_rows(format, &rows)
}
