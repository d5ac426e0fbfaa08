//! Backward induction over a built lattice.
//!
//! Two traversals value the same lattice and agree to rounding:
//!
//! - [`rollback_recursive`]: memoised depth-first evaluation from the root,
//!   driven by an explicit work stack
//! - [`rollback_iterative`]: column sweep from the terminal column back to
//!   the root, following predecessor back-links
//!
//! Both use the same per-node rule. Terminal nodes take the payoff
//! `max(0, (S − K)·sign)`. Other nodes take the discounted expectation over
//! their branches, and American exercise floors it at the intrinsic value.
//!
//! Kind and style default to the lattice's contract and can be overridden
//! per call, so one lattice values calls and puts of both styles.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketParameters;
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
//! use pricer_pricing::backward::{price_iterative, price_recursive};
//! use pricer_pricing::lattice::build_lattice;
//!
//! let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
//! let contract = ContractTerms::new(
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     100.0,
//!     OptionKind::Put,
//!     ExerciseStyle::European,
//! )
//! .unwrap();
//! let lattice = build_lattice(&market, &contract, 100).unwrap();
//!
//! let european = price_iterative(&lattice, None, None).unwrap();
//! let american = price_iterative(&lattice, None, Some(ExerciseStyle::American)).unwrap();
//! assert!(american > european);
//! assert!((price_recursive(&lattice).unwrap() - european).abs() < 1e-9);
//! ```

mod iterative;
mod recursive;
mod valuation;

use std::fmt;

use pricer_models::instruments::{ExerciseStyle, OptionKind};

use crate::lattice::{Branching, Lattice, LatticeError, NodeId};

pub use iterative::{price_iterative, rollback_iterative};
pub use recursive::{price_recursive, rollback_recursive};
pub use valuation::Valuation;

/// Choice of backward-induction traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Memoised depth-first evaluation from the root.
    Recursive,
    /// Column sweep from maturity to the root.
    #[default]
    Iterative,
}

impl Traversal {
    /// Values `lattice` with this traversal.
    ///
    /// # Errors
    ///
    /// Propagates [`LatticeError`] from the traversal.
    pub fn rollback(
        self,
        lattice: &Lattice,
        kind: Option<OptionKind>,
        style: Option<ExerciseStyle>,
    ) -> Result<Valuation, LatticeError> {
        match self {
            Traversal::Recursive => rollback_recursive(lattice, kind, style),
            Traversal::Iterative => rollback_iterative(lattice, kind, style),
        }
    }

    /// Root value of `lattice` with this traversal.
    ///
    /// # Errors
    ///
    /// Propagates [`LatticeError`] from the traversal.
    pub fn price(
        self,
        lattice: &Lattice,
        kind: Option<OptionKind>,
        style: Option<ExerciseStyle>,
    ) -> Result<f64, LatticeError> {
        self.rollback(lattice, kind, style)?.price()
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traversal::Recursive => f.write_str("recursive"),
            Traversal::Iterative => f.write_str("iterative"),
        }
    }
}

/// Per-node valuation rule shared by both traversals.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Exercise {
    kind: OptionKind,
    style: ExerciseStyle,
    strike: f64,
    discount: f64,
}

impl Exercise {
    pub(crate) fn resolve(
        lattice: &Lattice,
        kind: Option<OptionKind>,
        style: Option<ExerciseStyle>,
    ) -> Self {
        let contract = lattice.contract();
        Self {
            kind: kind.unwrap_or(contract.kind()),
            style: style.unwrap_or(contract.style()),
            strike: contract.strike(),
            discount: lattice.discount_factor(),
        }
    }

    #[inline]
    pub(crate) fn payoff(&self, price: f64) -> f64 {
        self.kind.payoff(price, self.strike)
    }

    /// Value of `id` given the values of its successors.
    pub(crate) fn node_value(
        &self,
        lattice: &Lattice,
        id: NodeId,
        values: &Valuation,
    ) -> Result<f64, LatticeError> {
        let node = lattice.node(id);
        let link = |next: Option<NodeId>| next.ok_or(LatticeError::MissingLink(id));

        let continuation = match node.branching() {
            Branching::Terminal => return Ok(self.payoff(node.price())),
            Branching::Pruned => values.get(link(node.next_mid())?)? * self.discount,
            Branching::Calibrated(p) => {
                let expectation = p.up * values.get(link(node.next_up())?)?
                    + p.mid * values.get(link(node.next_mid())?)?
                    + p.down * values.get(link(node.next_down())?)?;
                expectation * self.discount
            }
        };

        if self.style.allows_early_exercise() {
            Ok(continuation.max(self.payoff(node.price())))
        } else {
            Ok(continuation)
        }
    }
}
