//! The built lattice: node arena plus per-column trunk handles.

use std::fmt;

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;

use super::config::LatticeConfig;
use super::node::{Branching, NodeId, TreeNode};

/// A recombining trinomial lattice.
///
/// Owns every node in a flat arena; links between nodes are [`NodeId`]
/// handles. The lattice is immutable once built and can be valued any number
/// of times, see [`crate::backward`].
#[derive(Debug, Clone)]
pub struct Lattice {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) trunks: Vec<NodeId>,
    pub(crate) market: MarketParameters,
    pub(crate) contract: ContractTerms,
    pub(crate) config: LatticeConfig,
    pub(crate) dt: f64,
    pub(crate) alpha: f64,
    pub(crate) dividend_step: Option<usize>,
    pub(crate) calibration_warnings: usize,
}

impl Lattice {
    /// Node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this lattice.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    /// All nodes in creation order.
    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root node (step 0, spot price).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.trunks[0]
    }

    /// Trunk node of column `step`, if the column exists.
    #[inline]
    pub fn trunk(&self, step: usize) -> Option<NodeId> {
        self.trunks.get(step).copied()
    }

    /// Trunk nodes of every column, root first.
    #[inline]
    pub fn trunks(&self) -> &[NodeId] {
        &self.trunks
    }

    /// Number of time steps N.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.trunks.len() - 1
    }

    /// Step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Spacing factor between adjacent price levels.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// One-step discount factor `e^(-r·dt)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.market.rate() * self.dt).exp()
    }

    /// Market the lattice was built from.
    #[inline]
    pub fn market(&self) -> &MarketParameters {
        &self.market
    }

    /// Contract the lattice was built for.
    #[inline]
    pub fn contract(&self) -> &ContractTerms {
        &self.contract
    }

    /// Settings used for the build.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Step during which the dividend detaches, if any.
    #[inline]
    pub fn dividend_step(&self) -> Option<usize> {
        self.dividend_step
    }

    /// Number of nodes whose probabilities were out of range and kept
    /// under [`CalibrationPolicy::Warn`](super::CalibrationPolicy::Warn).
    #[inline]
    pub fn calibration_warnings(&self) -> usize {
        self.calibration_warnings
    }

    /// Nodes of column `step`, lowest price first.
    ///
    /// Empty when `step > n_steps`.
    pub fn column(&self, step: usize) -> Vec<NodeId> {
        let Some(trunk) = self.trunk(step) else {
            return Vec::new();
        };

        let mut bottom = trunk;
        while let Some(down) = self.node(bottom).neighbor_down {
            bottom = down;
        }

        let mut column = Vec::new();
        let mut cursor = Some(bottom);
        while let Some(id) = cursor {
            column.push(id);
            cursor = self.node(id).neighbor_up;
        }
        column
    }

    /// Sum of reach probabilities over column `step`.
    pub fn column_reach(&self, step: usize) -> f64 {
        self.column(step)
            .into_iter()
            .map(|id| self.node(id).reach())
            .sum()
    }

    /// Node and branch statistics.
    pub fn summary(&self) -> LatticeSummary {
        let mut pruned = 0;
        let mut calibrated = 0;
        for node in &self.nodes {
            match node.branching() {
                Branching::Pruned => pruned += 1,
                Branching::Calibrated(_) => calibrated += 1,
                Branching::Terminal => {}
            }
        }
        let widest_column = (0..=self.n_steps())
            .map(|step| self.column(step).len())
            .max()
            .unwrap_or(0);

        LatticeSummary {
            n_steps: self.n_steps(),
            node_count: self.nodes.len(),
            calibrated_count: calibrated,
            pruned_count: pruned,
            widest_column,
            dividend_step: self.dividend_step,
            calibration_warnings: self.calibration_warnings,
        }
    }
}

/// Node and branch statistics of a [`Lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeSummary {
    /// Number of time steps.
    pub n_steps: usize,
    /// Total nodes in the arena.
    pub node_count: usize,
    /// Nodes with three calibrated branches.
    pub calibrated_count: usize,
    /// Nodes collapsed to a single branch.
    pub pruned_count: usize,
    /// Largest number of nodes in one column.
    pub widest_column: usize,
    /// Step during which the dividend detaches.
    pub dividend_step: Option<usize>,
    /// Out-of-range calibrations tolerated under the warn policy.
    pub calibration_warnings: usize,
}

impl fmt::Display for LatticeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps, {} nodes ({} calibrated, {} pruned), widest column {}",
            self.n_steps, self.node_count, self.calibrated_count, self.pruned_count, self.widest_column
        )?;
        if let Some(step) = self.dividend_step {
            write!(f, ", dividend at step {}", step)?;
        }
        Ok(())
    }
}
