//! Lattice nodes and their handles.

use std::fmt;

use super::calibration::TransitionProbabilities;

/// Handle of a node inside a [`Lattice`](super::Lattice) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a node transitions to the next column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branching {
    /// Last column; valued by the payoff.
    Terminal,
    /// Reach below the pruning threshold; single branch to `next_mid` with probability 1.
    Pruned,
    /// Three branches with calibrated probabilities.
    Calibrated(TransitionProbabilities),
}

/// One (step, price level) cell of the lattice.
///
/// Vertical links (`neighbor_up`/`neighbor_down`) join nodes of the same
/// column, which differ by the factor α. Forward links (`next_*`) point into
/// the following column; they are shared between nodes, which is what makes
/// the lattice recombine.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    step: usize,
    price: f64,
    pub(crate) neighbor_up: Option<NodeId>,
    pub(crate) neighbor_down: Option<NodeId>,
    pub(crate) next_up: Option<NodeId>,
    pub(crate) next_mid: Option<NodeId>,
    pub(crate) next_down: Option<NodeId>,
    pub(crate) predecessor: Option<NodeId>,
    pub(crate) branching: Branching,
    pub(crate) reach: f64,
}

impl TreeNode {
    pub(crate) fn new(step: usize, price: f64) -> Self {
        Self {
            step,
            price,
            neighbor_up: None,
            neighbor_down: None,
            next_up: None,
            next_mid: None,
            next_down: None,
            predecessor: None,
            branching: Branching::Terminal,
            reach: 0.0,
        }
    }

    /// Time step (column index) of the node.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Underlying price at this node.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Node one level above in the same column.
    #[inline]
    pub fn neighbor_up(&self) -> Option<NodeId> {
        self.neighbor_up
    }

    /// Node one level below in the same column.
    #[inline]
    pub fn neighbor_down(&self) -> Option<NodeId> {
        self.neighbor_down
    }

    /// Upper successor in the next column.
    #[inline]
    pub fn next_up(&self) -> Option<NodeId> {
        self.next_up
    }

    /// Middle successor in the next column.
    #[inline]
    pub fn next_mid(&self) -> Option<NodeId> {
        self.next_mid
    }

    /// Lower successor in the next column.
    #[inline]
    pub fn next_down(&self) -> Option<NodeId> {
        self.next_down
    }

    /// A node of the previous column whose middle successor is this node.
    ///
    /// When several nodes share this node as middle successor, the last one
    /// processed during the build is kept.
    #[inline]
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    /// Transition type of the node.
    #[inline]
    pub fn branching(&self) -> Branching {
        self.branching
    }

    /// Transition probabilities, for calibrated nodes.
    #[inline]
    pub fn probabilities(&self) -> Option<TransitionProbabilities> {
        match self.branching {
            Branching::Calibrated(p) => Some(p),
            _ => None,
        }
    }

    /// Cumulative probability of reaching this node from the root.
    #[inline]
    pub fn reach(&self) -> f64 {
        self.reach
    }

    /// Returns whether the node was pruned.
    #[inline]
    pub fn is_pruned(&self) -> bool {
        matches!(self.branching, Branching::Pruned)
    }

    /// Returns whether the node sits in the last column.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.branching, Branching::Terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unlinked_terminal() {
        let node = TreeNode::new(3, 101.5);
        assert_eq!(node.step(), 3);
        assert_eq!(node.price(), 101.5);
        assert!(node.is_terminal());
        assert!(node.next_mid().is_none());
        assert!(node.predecessor().is_none());
        assert_eq!(node.reach(), 0.0);
        assert!(node.probabilities().is_none());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(42).to_string(), "#42");
        assert_eq!(NodeId::new(7).index(), 7);
    }
}
