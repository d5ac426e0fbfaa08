//! Greeks command implementation

use serde::Serialize;
use tracing::info;

use super::engine;
use crate::config::ResolvedRequest;
use crate::output::{num, write_record, OutputFormat, Row};
use crate::Result;

#[derive(Debug, Serialize)]
struct GreeksRow {
    n_steps: usize,
    price: f64,
    delta: f64,
    gamma: f64,
    vega: f64,
    volga: f64,
    vanna: f64,
}

impl Row for GreeksRow {
    fn headers() -> &'static [&'static str] {
        &["N", "price", "delta", "gamma", "vega", "volga", "vanna"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.n_steps.to_string(),
            num(self.price),
            num(self.delta),
            num(self.gamma),
            num(self.vega),
            num(self.volga),
            num(self.vanna),
        ]
    }
}

/// Run the greeks command
pub fn run(request: &ResolvedRequest, format: OutputFormat) -> Result<()> {
    info!(n_steps = request.n_steps, bumps = ?request.bumps, "Computing Greeks");

    let greeks = engine(request).compute_all(&request.market, &request.contract)?;
    let row = GreeksRow {
        n_steps: request.n_steps,
        price: greeks.price,
        delta: greeks.delta,
        gamma: greeks.gamma,
        vega: greeks.vega,
        volga: greeks.volga,
        vanna: greeks.vanna,
    };

    write_record(format, &row)
}
