//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands receive a
//! validated [`ResolvedRequest`](crate::config::ResolvedRequest).

pub mod check;
pub mod convergence;
pub mod greeks;
pub mod ladder;
pub mod price;
pub mod strikes;

use pricer_risk::GreekEngine;

use crate::config::ResolvedRequest;

/// Greek engine configured from the request
pub(crate) fn engine(request: &ResolvedRequest) -> GreekEngine {
    GreekEngine::new(request.n_steps)
        .with_bumps(request.bumps)
        .with_config(request.lattice)
}
