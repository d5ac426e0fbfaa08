//! Check command implementation
//!
//! Builds the requested lattice and verifies its structural properties:
//! mass conservation, traversal agreement, exercise ordering and
//! calibration cleanliness.

use pricer_models::instruments::ExerciseStyle;
use pricer_pricing::backward::{price_iterative, price_recursive};
use pricer_pricing::lattice::build_lattice_with_config;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ResolvedRequest;
use crate::output::{write_rows, OutputFormat, Row};
use crate::{CliError, Result};

const REACH_TOLERANCE: f64 = 1e-6;
const TRAVERSAL_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Serialize)]
struct CheckRow {
    check: &'static str,
    value: String,
    passed: bool,
}

impl Row for CheckRow {
    fn headers() -> &'static [&'static str] {
        &["check", "value", "status"]
    }

    fn cells(&self) -> Vec<String> {
        let status = if self.passed { "ok" } else { "FAILED" };
        vec![self.check.to_string(), self.value.clone(), status.to_string()]
    }
}

/// Run the check command
pub fn run(request: &ResolvedRequest, format: OutputFormat) -> Result<()> {
    info!("Checking lattice configuration...");
    let lattice = build_lattice_with_config(
        &request.market,
        &request.contract,
        request.n_steps,
        request.lattice,
    )?;
    let summary = lattice.summary();

    let reach_error = (0..=lattice.n_steps())
        .map(|step| (lattice.column_reach(step) - 1.0).abs())
        .fold(0.0_f64, f64::max);

    let iterative = price_iterative(&lattice, None, None)?;
    let recursive = price_recursive(&lattice)?;
    let traversal_gap = (iterative - recursive).abs() / iterative.abs().max(f64::MIN_POSITIVE);

    let european = price_iterative(&lattice, None, Some(ExerciseStyle::European))?;
    let american = price_iterative(&lattice, None, Some(ExerciseStyle::American))?;

    let rows = vec![
        CheckRow {
            check: "lattice",
            value: summary.to_string(),
            passed: true,
        },
        CheckRow {
            check: "column reach",
            value: format!("max |sum - 1| = {:.3e}", reach_error),
            passed: reach_error < REACH_TOLERANCE,
        },
        CheckRow {
            check: "traversals",
            value: format!("relative gap = {:.3e}", traversal_gap),
            passed: traversal_gap <= TRAVERSAL_TOLERANCE,
        },
        CheckRow {
            check: "american >= european",
            value: format!("{:.6} >= {:.6}", american, european),
            passed: american >= european,
        },
        CheckRow {
            check: "calibration",
            value: format!("{} tolerated violations", summary.calibration_warnings),
            passed: summary.calibration_warnings == 0,
        },
    ];

    write_rows(format, &rows)?;

    let failed = rows.iter().filter(|row| !row.passed).count();
    if failed > 0 {
        warn!(failed, "Lattice checks failed");
        return Err(CliError::CheckFailed(failed));
    }
    info!("All checks passed");
    Ok(())
}
