//! Column-sweep backward induction.

use pricer_models::instruments::{ExerciseStyle, OptionKind};

use super::{Exercise, Valuation};
use crate::lattice::{Lattice, LatticeError, NodeId};

/// Values every node column by column, from maturity back to the root.
///
/// The terminal column takes the payoff. Each earlier column is entered at
/// the predecessor of the previous anchor and swept upward then downward
/// through its vertical links; the recorded trunk stands in for a column
/// whose anchor has no predecessor.
///
/// # Errors
///
/// [`LatticeError::UnvaluedNode`] or [`LatticeError::MissingLink`] if the
/// lattice links are inconsistent.
pub fn rollback_iterative(
    lattice: &Lattice,
    kind: Option<OptionKind>,
    style: Option<ExerciseStyle>,
) -> Result<Valuation, LatticeError> {
    let exercise = Exercise::resolve(lattice, kind, style);
    let mut values = Valuation::new(lattice.node_count(), lattice.root());
    let trunks = lattice.trunks();
    let n_steps = lattice.n_steps();

    for id in lattice.column(n_steps) {
        values.set(id, exercise.payoff(lattice.node(id).price()));
    }

    let mut anchor = trunks[n_steps];
    for step in (0..n_steps).rev() {
        anchor = lattice.node(anchor).predecessor().unwrap_or(trunks[step]);
        sweep(lattice, &exercise, &mut values, Some(anchor), |id| {
            lattice.node(id).neighbor_up()
        })?;
        sweep(
            lattice,
            &exercise,
            &mut values,
            lattice.node(anchor).neighbor_down(),
            |id| lattice.node(id).neighbor_down(),
        )?;
    }

    Ok(values)
}

fn sweep(
    lattice: &Lattice,
    exercise: &Exercise,
    values: &mut Valuation,
    start: Option<NodeId>,
    next: impl Fn(NodeId) -> Option<NodeId>,
) -> Result<(), LatticeError> {
    let mut cursor = start;
    while let Some(id) = cursor {
        let value = exercise.node_value(lattice, id, values)?;
        values.set(id, value);
        cursor = next(id);
    }
    Ok(())
}

/// Root value by column sweep, with optional kind and style overrides.
///
/// # Errors
///
/// See [`rollback_iterative`].
pub fn price_iterative(
    lattice: &Lattice,
    kind: Option<OptionKind>,
    style: Option<ExerciseStyle>,
) -> Result<f64, LatticeError> {
    rollback_iterative(lattice, kind, style)?.price()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::build_lattice;
    use approx::assert_relative_eq;
    use pricer_core::market_data::MarketParameters;
    use pricer_core::types::Date;
    use pricer_models::instruments::ContractTerms;

    fn lattice(n_steps: usize) -> Lattice {
        let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
        let contract = ContractTerms::new(
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            100.0,
            OptionKind::Call,
            ExerciseStyle::European,
        )
        .unwrap();
        build_lattice(&market, &contract, n_steps).unwrap()
    }

    #[test]
    fn test_every_column_node_is_valued() {
        let lattice = lattice(40);
        let valuation = rollback_iterative(&lattice, None, None).unwrap();
        assert_eq!(valuation.valued_count(), lattice.node_count());
    }

    #[test]
    fn test_one_step_by_hand() {
        let lattice = lattice(1);
        let root = lattice.node(lattice.root());
        let p = root.probabilities().unwrap();
        let payoff = |id: Option<NodeId>| (lattice.node(id.unwrap()).price() - 100.0).max(0.0);

        let expected = (p.up * payoff(root.next_up())
            + p.mid * payoff(root.next_mid())
            + p.down * payoff(root.next_down()))
            * (-0.05_f64).exp();

        assert_relative_eq!(
            price_iterative(&lattice, None, None).unwrap(),
            expected,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_terminal_column_holds_payoff() {
        let lattice = lattice(25);
        let valuation = rollback_iterative(&lattice, Some(OptionKind::Put), None).unwrap();
        for id in lattice.column(25) {
            let price = lattice.node(id).price();
            assert_eq!(valuation.value(id), Some((100.0 - price).max(0.0)));
        }
    }

    #[test]
    fn test_american_never_below_intrinsic() {
        let lattice = lattice(60);
        let valuation =
            rollback_iterative(&lattice, Some(OptionKind::Put), Some(ExerciseStyle::American))
                .unwrap();
        for (index, node) in lattice.nodes().iter().enumerate() {
            let value = valuation.value(NodeId::new(index)).unwrap();
            assert!(value >= (100.0 - node.price()).max(0.0) - 1e-12);
        }
    }
}
