//! Per-pricing node values.

use crate::lattice::{LatticeError, NodeId};

/// Option values written by one backward-induction run.
///
/// Indexed by [`NodeId`]; a node that the traversal never reached has no
/// value. Each node is written at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    values: Vec<Option<f64>>,
    root: NodeId,
}

impl Valuation {
    pub(crate) fn new(node_count: usize, root: NodeId) -> Self {
        Self {
            values: vec![None; node_count],
            root,
        }
    }

    /// Value at `id`, if the traversal reached it.
    #[inline]
    pub fn value(&self, id: NodeId) -> Option<f64> {
        self.values.get(id.index()).copied().flatten()
    }

    /// Present value of the option (value at the root).
    ///
    /// # Errors
    ///
    /// [`LatticeError::UnvaluedNode`] if the run did not reach the root.
    pub fn price(&self) -> Result<f64, LatticeError> {
        self.get(self.root)
    }

    /// Number of nodes that hold a value.
    pub fn valued_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    #[inline]
    pub(crate) fn is_valued(&self, id: NodeId) -> bool {
        self.values[id.index()].is_some()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Result<f64, LatticeError> {
        self.value(id).ok_or(LatticeError::UnvaluedNode(id))
    }

    #[inline]
    pub(crate) fn set(&mut self, id: NodeId, value: f64) {
        debug_assert!(self.values[id.index()].is_none(), "node {id} valued twice");
        self.values[id.index()] = Some(value);
    }
}
