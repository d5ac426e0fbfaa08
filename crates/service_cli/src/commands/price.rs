//! Price command implementation
//!
//! Prices the request with both backward-induction traversals and the
//! closed-form reference, with wall-clock timings.

use std::time::Instant;

use pricer_models::analytical::BlackScholes;
use pricer_pricing::backward::{price_iterative, price_recursive};
use pricer_pricing::lattice::build_lattice_with_config;
use serde::Serialize;
use tracing::info;

use crate::config::ResolvedRequest;
use crate::output::{num, write_record, OutputFormat, Row};
use crate::Result;

#[derive(Debug, Serialize)]
struct PriceRow {
    kind: String,
    style: String,
    strike: f64,
    n_steps: usize,
    iterative: f64,
    recursive: f64,
    reference: f64,
    difference: f64,
    build_ms: f64,
    iterative_ms: f64,
    recursive_ms: f64,
    node_count: usize,
    pruned_count: usize,
    dividend_step: Option<usize>,
}

impl Row for PriceRow {
    fn headers() -> &'static [&'static str] {
        &[
            "kind", "style", "strike", "N", "iterative", "recursive", "reference", "tree - ref",
            "build ms", "iter ms", "rec ms", "nodes",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.kind.clone(),
            self.style.clone(),
            num(self.strike),
            self.n_steps.to_string(),
            num(self.iterative),
            num(self.recursive),
            num(self.reference),
            num(self.difference),
            format!("{:.3}", self.build_ms),
            format!("{:.3}", self.iterative_ms),
            format!("{:.3}", self.recursive_ms),
            self.node_count.to_string(),
        ]
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1_000.0
}

/// Run the price command
pub fn run(request: &ResolvedRequest, format: OutputFormat) -> Result<()> {
    let contract = &request.contract;
    info!(
        kind = %contract.kind(),
        style = %contract.style(),
        strike = contract.strike(),
        n_steps = request.n_steps,
        "Starting pricing"
    );

    let start = Instant::now();
    let lattice =
        build_lattice_with_config(&request.market, contract, request.n_steps, request.lattice)?;
    let build_ms = elapsed_ms(start);

    let start = Instant::now();
    let iterative = price_iterative(&lattice, None, None)?;
    let iterative_ms = elapsed_ms(start);

    let start = Instant::now();
    let recursive = price_recursive(&lattice)?;
    let recursive_ms = elapsed_ms(start);

    let reference = BlackScholes::from_inputs(&request.market, contract)?.price_contract(contract);
    let summary = lattice.summary();

    let row = PriceRow {
        kind: contract.kind().to_string(),
        style: contract.style().to_string(),
        strike: contract.strike(),
        n_steps: request.n_steps,
        iterative,
        recursive,
        reference,
        difference: iterative - reference,
        build_ms,
        iterative_ms,
        recursive_ms,
        node_count: summary.node_count,
        pruned_count: summary.pruned_count,
        dividend_step: summary.dividend_step,
    };

    info!(%summary, "Pricing complete");
    write_record(format, &row)
}
