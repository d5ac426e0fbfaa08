//! Memoised depth-first backward induction.
//!
//! The recursion `V(node) = f(V(successors))` is unrolled onto a heap stack
//! so that depth is bounded by memory, not by the call stack. A node is
//! pushed as `Expand`, which schedules its successors and a matching
//! `Settle`; by the time `Settle` is popped every successor holds a value.

use pricer_models::instruments::{ExerciseStyle, OptionKind};

use super::{Exercise, Valuation};
use crate::lattice::{Branching, Lattice, LatticeError, NodeId};

#[derive(Debug, Clone, Copy)]
enum Visit {
    Expand(NodeId),
    Settle(NodeId),
}

/// Values the nodes reachable from the root by depth-first evaluation.
///
/// Shared successors are evaluated once and read from the valuation
/// afterwards. Nodes not reachable through `next_*` links stay unvalued.
///
/// # Errors
///
/// [`LatticeError::UnvaluedNode`] or [`LatticeError::MissingLink`] if the
/// lattice links are inconsistent.
pub fn rollback_recursive(
    lattice: &Lattice,
    kind: Option<OptionKind>,
    style: Option<ExerciseStyle>,
) -> Result<Valuation, LatticeError> {
    let exercise = Exercise::resolve(lattice, kind, style);
    let mut values = Valuation::new(lattice.node_count(), lattice.root());
    let mut stack = vec![Visit::Expand(lattice.root())];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Expand(id) => {
                if values.is_valued(id) {
                    continue;
                }
                let node = lattice.node(id);
                if matches!(node.branching(), Branching::Terminal) {
                    values.set(id, exercise.payoff(node.price()));
                    continue;
                }
                stack.push(Visit::Settle(id));
                for next in [node.next_down(), node.next_mid(), node.next_up()]
                    .into_iter()
                    .flatten()
                {
                    if !values.is_valued(next) {
                        stack.push(Visit::Expand(next));
                    }
                }
            }
            Visit::Settle(id) => {
                if values.is_valued(id) {
                    continue;
                }
                let value = exercise.node_value(lattice, id, &values)?;
                values.set(id, value);
            }
        }
    }

    Ok(values)
}

/// Root value by depth-first evaluation, using the lattice's contract.
///
/// # Errors
///
/// See [`rollback_recursive`].
pub fn price_recursive(lattice: &Lattice) -> Result<f64, LatticeError> {
    rollback_recursive(lattice, None, None)?.price()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backward::rollback_iterative;
    use crate::lattice::build_lattice;
    use pricer_core::market_data::MarketParameters;
    use pricer_core::types::Date;
    use pricer_models::instruments::ContractTerms;

    fn lattice(n_steps: usize, style: ExerciseStyle) -> Lattice {
        let market = MarketParameters::new(100.0, 0.03, 0.3)
            .unwrap()
            .with_dividend(2.0, Date::from_ymd(2025, 5, 1).unwrap())
            .unwrap();
        let contract = ContractTerms::new(
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2025, 12, 31).unwrap(),
            95.0,
            OptionKind::Put,
            style,
        )
        .unwrap();
        build_lattice(&market, &contract, n_steps).unwrap()
    }

    #[test]
    fn test_matches_iterative_on_every_reached_node() {
        let lattice = lattice(80, ExerciseStyle::American);
        let recursive = rollback_recursive(&lattice, None, None).unwrap();
        let iterative = rollback_iterative(&lattice, None, None).unwrap();

        for index in 0..lattice.node_count() {
            let id = NodeId::new(index);
            if let Some(value) = recursive.value(id) {
                assert_eq!(Some(value), iterative.value(id));
            }
        }
        assert_eq!(recursive.price(), iterative.price());
    }

    #[test]
    fn test_deep_lattice_does_not_overflow_stack() {
        let lattice = lattice(1500, ExerciseStyle::European);
        assert!(price_recursive(&lattice).unwrap() > 0.0);
    }

    #[test]
    fn test_root_reachability() {
        let lattice = lattice(10, ExerciseStyle::European);
        let valuation = rollback_recursive(&lattice, None, None).unwrap();
        assert!(valuation.value(lattice.root()).is_some());
        assert!(valuation.valued_count() <= lattice.node_count());
    }
}
