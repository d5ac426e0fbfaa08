//! Convergence command implementation
//!
//! Tree price against the closed form for a grid of step counts.

use pricer_risk::scenarios::{convergence_study_with_config, ConvergencePoint};
use serde::Serialize;
use tracing::info;

use crate::config::ResolvedRequest;
use crate::output::{num, write_rows, OutputFormat, Row};
use crate::Result;

/// Step grid used when `--grid` is not given
pub const DEFAULT_GRID: [usize; 8] = [10, 25, 50, 100, 200, 400, 800, 1600];

#[derive(Debug, Serialize)]
struct ConvergenceRow {
    n_steps: usize,
    tree_price: f64,
    reference_price: f64,
    error: f64,
    scaled_error: f64,
    build_ms: f64,
    price_ms: f64,
}

impl From<&ConvergencePoint> for ConvergenceRow {
    fn from(point: &ConvergencePoint) -> Self {
        Self {
            n_steps: point.n_steps,
            tree_price: point.tree_price,
            reference_price: point.reference_price,
            error: point.error,
            scaled_error: point.scaled_error,
            build_ms: point.build_time_ms(),
            price_ms: point.price_time_ms(),
        }
    }
}

impl Row for ConvergenceRow {
    fn headers() -> &'static [&'static str] {
        &["N", "tree", "reference", "error", "error x N", "build ms", "price ms"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.n_steps.to_string(),
            num(self.tree_price),
            num(self.reference_price),
            num(self.error),
            num(self.scaled_error),
            format!("{:.3}", self.build_ms),
            format!("{:.3}", self.price_ms),
        ]
    }
}

/// Run the convergence command
pub fn run(request: &ResolvedRequest, grid: &[usize], format: OutputFormat) -> Result<()> {
    let grid = if grid.is_empty() { &DEFAULT_GRID[..] } else { grid };
    info!(points = grid.len(), "Running convergence study");

    let points =
        convergence_study_with_config(&request.market, &request.contract, grid, request.lattice)?;
    let rows: Vec<ConvergenceRow> = points.iter().map(ConvergenceRow::from).collect();
    write_rows(format, &rows)
}
