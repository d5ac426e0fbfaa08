//! Column-by-column lattice construction.
//!
//! Each step seeds the next column with a node at the trunk's forward, then
//! walks the current column upward and downward from the trunk. For every
//! node the middle successor is located by a recombination search that
//! starts from a running anchor, so consecutive nodes reuse the successor
//! column instead of allocating new levels. Up and down successors are the
//! vertical neighbours of the middle one, created on demand.

use pricer_core::market_data::MarketParameters;
use pricer_models::instruments::ContractTerms;

use super::calibration::compute_probabilities;
use super::config::{CalibrationPolicy, LatticeConfig};
use super::error::LatticeError;
use super::node::{Branching, NodeId, TreeNode};
use super::tree::Lattice;

/// Builds [`Lattice`] instances with a fixed [`LatticeConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParameters;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
/// use pricer_pricing::lattice::{LatticeBuilder, LatticeConfig};
///
/// let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
/// let contract = ContractTerms::new(
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     100.0,
///     OptionKind::Call,
///     ExerciseStyle::European,
/// )
/// .unwrap();
///
/// let lattice = LatticeBuilder::new(LatticeConfig::default())
///     .build(&market, &contract, 50)
///     .unwrap();
///
/// assert_eq!(lattice.n_steps(), 50);
/// assert!((lattice.column_reach(50) - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeBuilder {
    config: LatticeConfig,
}

impl LatticeBuilder {
    /// Creates a builder with the given settings.
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// Settings used by this builder.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Builds an `n_steps` lattice for `contract` on `market`.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::InvalidStepCount`] if `n_steps == 0`
    /// - [`LatticeError::NonPositiveMaturity`] if the contract has no time left
    /// - [`LatticeError::InvalidParameter`] if the configuration is invalid
    /// - [`LatticeError::CalibrationDomain`] if a node's probabilities leave
    ///   `[0, 1]` and the policy is [`CalibrationPolicy::Reject`]
    /// - [`LatticeError::NonPositiveForward`] if the dividend exceeds the
    ///   grown price of a node
    ///
    /// # Limitations
    ///
    /// At the dividend step, nodes far below spot have a forward that is
    /// small next to their own variance, so no three adjacent levels can
    /// match both moments. With high volatility over a long horizon and a
    /// dividend of a few percent of spot (e.g. σ = 0.5, T = 3, D = 5 on
    /// S = 100) these nodes are still above the pruning threshold and the
    /// default [`CalibrationPolicy::Reject`] fails with `CalibrationDomain`.
    /// [`CalibrationPolicy::Warn`] keeps building on the raw probabilities,
    /// but nodes priced below the dividend then fail with
    /// `NonPositiveForward`.
    pub fn build(
        &self,
        market: &MarketParameters,
        contract: &ContractTerms,
        n_steps: usize,
    ) -> Result<Lattice, LatticeError> {
        if n_steps == 0 {
            return Err(LatticeError::InvalidStepCount(n_steps));
        }
        let maturity = contract.time_to_maturity();
        if maturity <= 0.0 {
            return Err(LatticeError::NonPositiveMaturity(maturity));
        }
        self.config.validate()?;

        let dt = maturity / n_steps as f64;
        let sigma = market.volatility();
        let mut state = BuildState {
            nodes: Vec::with_capacity(n_steps * 8),
            alpha: (sigma * (3.0 * dt).sqrt()).exp(),
            growth: (market.rate() * dt).exp(),
            variance_factor: (sigma * sigma * dt).exp_m1(),
            dividend: 0.0,
            step: 0,
            config: &self.config,
            calibration_warnings: 0,
        };

        let dividend_time = dividend_time(market, contract, maturity);

        let root = state.insert(0, market.spot());
        state.nodes[root.index()].reach = 1.0;
        let mut trunks = Vec::with_capacity(n_steps + 1);
        trunks.push(root);

        let mut trunk = root;
        let mut dividend_step = None;
        for step in 0..n_steps {
            let t_start = step as f64 * dt;
            let t_end = (step + 1) as f64 * dt;
            state.step = step;
            state.dividend = match dividend_time {
                Some(t_div) if t_start < t_div && t_div <= t_end => {
                    dividend_step = Some(step);
                    market.dividend_amount()
                }
                _ => 0.0,
            };

            trunk = state.build_column(trunk)?;
            trunks.push(trunk);
        }

        let lattice = Lattice {
            nodes: state.nodes,
            trunks,
            market: *market,
            contract: *contract,
            config: self.config,
            dt,
            alpha: state.alpha,
            dividend_step,
            calibration_warnings: state.calibration_warnings,
        };

        tracing::debug!(
            n_steps,
            nodes = lattice.node_count(),
            alpha = lattice.alpha(),
            dividend_step = ?dividend_step,
            warnings = lattice.calibration_warnings(),
            "lattice built"
        );

        Ok(lattice)
    }
}

/// Builds a lattice with default settings.
///
/// See [`LatticeBuilder::build`] for the error conditions.
pub fn build_lattice(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
) -> Result<Lattice, LatticeError> {
    LatticeBuilder::default().build(market, contract, n_steps)
}

/// Builds a lattice with explicit settings.
pub fn build_lattice_with_config(
    market: &MarketParameters,
    contract: &ContractTerms,
    n_steps: usize,
    config: LatticeConfig,
) -> Result<Lattice, LatticeError> {
    LatticeBuilder::new(config).build(market, contract, n_steps)
}

/// Dividend time in years when the dividend falls inside `(0, maturity]`.
fn dividend_time(
    market: &MarketParameters,
    contract: &ContractTerms,
    maturity: f64,
) -> Option<f64> {
    if market.dividend_amount() <= 0.0 {
        return None;
    }
    let t_div = market.dividend_time(contract.pricing_date())?;
    if t_div <= 0.0 || t_div > maturity {
        tracing::warn!(
            dividend = market.dividend_amount(),
            t_div,
            maturity,
            "dividend outside the contract horizon is ignored"
        );
        return None;
    }
    Some(t_div)
}

struct BuildState<'a> {
    nodes: Vec<TreeNode>,
    alpha: f64,
    growth: f64,
    variance_factor: f64,
    /// Dividend detaching during the current step.
    dividend: f64,
    step: usize,
    config: &'a LatticeConfig,
    calibration_warnings: usize,
}

impl BuildState<'_> {
    fn insert(&mut self, step: usize, price: f64) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(TreeNode::new(step, price));
        id
    }

    #[inline]
    fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    fn neighbor_up_or_insert(&mut self, id: NodeId) -> NodeId {
        if let Some(up) = self.node(id).neighbor_up {
            return up;
        }
        let (step, price) = (self.node(id).step(), self.node(id).price());
        let up = self.insert(step, price * self.alpha);
        self.node_mut(up).neighbor_down = Some(id);
        self.node_mut(id).neighbor_up = Some(up);
        up
    }

    fn neighbor_down_or_insert(&mut self, id: NodeId) -> NodeId {
        if let Some(down) = self.node(id).neighbor_down {
            return down;
        }
        let (step, price) = (self.node(id).step(), self.node(id).price());
        let down = self.insert(step, price / self.alpha);
        self.node_mut(down).neighbor_up = Some(id);
        self.node_mut(id).neighbor_down = Some(down);
        down
    }

    /// Node of the successor column closest to `forward`, walking from `start`.
    fn find_next_mid(&mut self, forward: f64, start: NodeId) -> NodeId {
        let alpha = self.alpha;
        let mut node = start;
        while forward > self.node(node).price() * (1.0 + alpha) / 2.0 {
            node = self.neighbor_up_or_insert(node);
        }
        while forward <= self.node(node).price() * (1.0 + 1.0 / alpha) / 2.0 {
            node = self.neighbor_down_or_insert(node);
        }
        node
    }

    /// Connects every node of the trunk's column and returns the next trunk.
    fn build_column(&mut self, trunk: NodeId) -> Result<NodeId, LatticeError> {
        let trunk_forward = self.forward(trunk)?;
        let seed = self.insert(self.step + 1, trunk_forward);

        let next_trunk = self.connect(trunk, seed)?;

        let mut cursor = self.node(trunk).neighbor_up;
        let mut mid = next_trunk;
        while let Some(current) = cursor {
            let anchor = self.neighbor_up_or_insert(mid);
            mid = self.connect(current, anchor)?;
            cursor = self.node(current).neighbor_up;
        }

        let mut cursor = self.node(trunk).neighbor_down;
        let mut mid = next_trunk;
        while let Some(current) = cursor {
            let anchor = self.neighbor_down_or_insert(mid);
            mid = self.connect(current, anchor)?;
            cursor = self.node(current).neighbor_down;
        }

        Ok(next_trunk)
    }

    fn forward(&self, id: NodeId) -> Result<f64, LatticeError> {
        let price = self.node(id).price();
        let forward = price * self.growth - self.dividend;
        if forward > 0.0 {
            Ok(forward)
        } else {
            Err(LatticeError::NonPositiveForward {
                step: self.step,
                price,
                forward,
            })
        }
    }

    /// Links `id` to its successors and propagates its reach probability.
    fn connect(&mut self, id: NodeId, anchor: NodeId) -> Result<NodeId, LatticeError> {
        let forward = self.forward(id)?;
        let mid = self.find_next_mid(forward, anchor);
        self.node_mut(mid).predecessor = Some(id);

        let (price, reach) = (self.node(id).price(), self.node(id).reach());
        if reach < self.config.pruning_threshold() {
            let node = self.node_mut(id);
            node.next_mid = Some(mid);
            node.branching = Branching::Pruned;
            self.node_mut(mid).reach += reach;
            return Ok(mid);
        }

        let up = self.neighbor_up_or_insert(mid);
        let down = self.neighbor_down_or_insert(mid);
        let p = compute_probabilities(
            price,
            self.node(mid).price(),
            self.growth,
            self.dividend,
            self.variance_factor,
            self.alpha,
        );

        if !p.is_within(self.config.calibration_tolerance()) {
            match self.config.calibration_policy() {
                CalibrationPolicy::Reject => {
                    return Err(LatticeError::CalibrationDomain {
                        step: self.step,
                        price,
                        p_up: p.up,
                        p_mid: p.mid,
                        p_down: p.down,
                    });
                }
                CalibrationPolicy::Warn => {
                    tracing::warn!(
                        step = self.step,
                        price,
                        p_up = p.up,
                        p_mid = p.mid,
                        p_down = p.down,
                        "transition probabilities out of range"
                    );
                    self.calibration_warnings += 1;
                }
            }
        }

        let node = self.node_mut(id);
        node.next_up = Some(up);
        node.next_mid = Some(mid);
        node.next_down = Some(down);
        node.branching = Branching::Calibrated(p);

        self.node_mut(up).reach += reach * p.up;
        self.node_mut(mid).reach += reach * p.mid;
        self.node_mut(down).reach += reach * p.down;

        Ok(mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;
    use pricer_models::instruments::{ExerciseStyle, OptionKind};

    fn contract(maturity: Date) -> ContractTerms {
        ContractTerms::new(
            Date::from_ymd(2025, 1, 1).unwrap(),
            maturity,
            100.0,
            OptionKind::Call,
            ExerciseStyle::European,
        )
        .unwrap()
    }

    fn one_year() -> ContractTerms {
        contract(Date::from_ymd(2026, 1, 1).unwrap())
    }

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_rejects_zero_steps() {
        let err = build_lattice(&market(), &one_year(), 0).unwrap_err();
        assert_eq!(err, LatticeError::InvalidStepCount(0));
    }

    #[test]
    fn test_rejects_expired_contract() {
        let expired = contract(Date::from_ymd(2025, 1, 1).unwrap());
        let err = build_lattice(&market(), &expired, 10).unwrap_err();
        assert_eq!(err, LatticeError::NonPositiveMaturity(0.0));
    }

    #[test]
    fn test_single_step_shape() {
        let lattice = build_lattice(&market(), &one_year(), 1).unwrap();
        let root = lattice.node(lattice.root());

        assert_eq!(root.price(), 100.0);
        assert_eq!(root.reach(), 1.0);
        let p = root.probabilities().unwrap();
        assert_relative_eq!(p.sum(), 1.0, epsilon = 1e-12);

        let mid = lattice.node(root.next_mid().unwrap());
        assert_relative_eq!(mid.price(), 100.0 * 0.05_f64.exp(), max_relative = 1e-12);
        assert_eq!(mid.predecessor(), Some(lattice.root()));
        assert_eq!(lattice.column(1).len(), 3);
        assert!(mid.is_terminal());
    }

    #[test]
    fn test_neighbor_spacing_is_alpha() {
        let lattice = build_lattice(&market(), &one_year(), 20).unwrap();
        let alpha = lattice.alpha();
        for step in 0..=20 {
            for pair in lattice.column(step).windows(2) {
                let low = lattice.node(pair[0]);
                let high = lattice.node(pair[1]);
                assert_eq!(low.neighbor_up(), Some(pair[1]));
                assert_eq!(high.neighbor_down(), Some(pair[0]));
                assert_relative_eq!(high.price() / low.price(), alpha, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_successors_bracket_mid() {
        let lattice = build_lattice(&market(), &one_year(), 30).unwrap();
        for node in lattice.nodes() {
            if let Some(p) = node.probabilities() {
                let mid = node.next_mid().unwrap();
                assert_eq!(lattice.node(mid).neighbor_up(), node.next_up());
                assert_eq!(lattice.node(mid).neighbor_down(), node.next_down());
                assert!(p.is_within(1e-9));
                assert_eq!(lattice.node(mid).step(), node.step() + 1);
            }
        }
    }

    #[test]
    fn test_dividend_step_detection() {
        let market = market()
            .with_dividend(3.0, Date::from_ymd(2025, 7, 2).unwrap())
            .unwrap();
        let lattice = build_lattice(&market, &one_year(), 10).unwrap();
        // t_div = 182/365 lies in (4·0.1, 5·0.1]
        assert_eq!(lattice.dividend_step(), Some(4));
    }

    #[test]
    fn test_dividend_after_maturity_is_ignored() {
        let market = market()
            .with_dividend(3.0, Date::from_ymd(2027, 1, 1).unwrap())
            .unwrap();
        let lattice = build_lattice(&market, &one_year(), 10).unwrap();
        assert_eq!(lattice.dividend_step(), None);
    }

    #[test]
    fn test_pruning_marks_low_reach_nodes() {
        let lattice = build_lattice(&market(), &one_year(), 200).unwrap();
        let summary = lattice.summary();
        assert!(summary.pruned_count > 0);
        for node in lattice.nodes().iter().filter(|n| n.is_pruned()) {
            assert!(node.reach() < 1e-8);
            assert!(node.next_up().is_none());
            assert!(node.next_down().is_none());
            assert!(node.next_mid().is_some());
        }

        let unpruned = build_lattice_with_config(
            &market(),
            &one_year(),
            200,
            LatticeConfig::default().without_pruning(),
        )
        .unwrap();
        assert_eq!(unpruned.summary().pruned_count, 0);
        assert!(unpruned.node_count() > lattice.node_count());
    }

    fn large_dividend_market() -> MarketParameters {
        // 60 of cash dividend against a 100 spot in a quarter-year step:
        // the variance no longer fits between adjacent levels.
        market()
            .with_dividend(60.0, Date::from_ymd(2025, 2, 6).unwrap())
            .unwrap()
    }

    #[test]
    fn test_calibration_reject_policy() {
        let err = build_lattice(&large_dividend_market(), &one_year(), 4).unwrap_err();
        match err {
            LatticeError::CalibrationDomain { step, price, p_mid, .. } => {
                assert_eq!(step, 0);
                assert_eq!(price, 100.0);
                assert!(p_mid < 0.0);
            }
            other => panic!("expected CalibrationDomain, got {other:?}"),
        }
    }

    #[test]
    fn test_calibration_warn_policy_keeps_raw_values() {
        let config = LatticeConfig::default().with_calibration_policy(CalibrationPolicy::Warn);
        let lattice =
            build_lattice_with_config(&large_dividend_market(), &one_year(), 4, config).unwrap();

        assert!(lattice.calibration_warnings() >= 1);
        let p = lattice.node(lattice.root()).probabilities().unwrap();
        assert!(p.mid < 0.0);
        assert_relative_eq!(p.sum(), 1.0, epsilon = 1e-12);
    }

    fn long_high_vol_contract() -> (MarketParameters, ContractTerms) {
        let market = MarketParameters::new(100.0, 0.05, 0.5)
            .unwrap()
            .with_dividend(5.0, Date::from_ymd(2027, 9, 25).unwrap())
            .unwrap();
        (market, contract(Date::from_ymd(2028, 1, 1).unwrap()))
    }

    #[test]
    fn test_low_nodes_at_dividend_step_are_rejected() {
        let (market, contract) = long_high_vol_contract();
        let err = build_lattice(&market, &contract, 50).unwrap_err();
        match err {
            LatticeError::CalibrationDomain { step, price, p_mid, .. } => {
                // t_div = 997/365 lies in (45·0.06, 46·0.06]
                assert_eq!(step, 45);
                assert!(price < 15.0);
                assert!(p_mid < 0.0);
            }
            other => panic!("expected CalibrationDomain, got {other:?}"),
        }
    }

    #[test]
    fn test_warn_policy_stops_below_the_dividend() {
        let (market, contract) = long_high_vol_contract();
        let config = LatticeConfig::default().with_calibration_policy(CalibrationPolicy::Warn);
        let err = build_lattice_with_config(&market, &contract, 50, config).unwrap_err();
        match err {
            LatticeError::NonPositiveForward { step, price, .. } => {
                assert_eq!(step, 45);
                assert!(price < 5.0);
            }
            other => panic!("expected NonPositiveForward, got {other:?}"),
        }
    }

    #[test]
    fn test_same_dividend_prices_at_moderate_volatility() {
        let market = MarketParameters::new(100.0, 0.05, 0.2)
            .unwrap()
            .with_dividend(1.0, Date::from_ymd(2027, 9, 25).unwrap())
            .unwrap();
        let lattice =
            build_lattice(&market, &contract(Date::from_ymd(2028, 1, 1).unwrap()), 50).unwrap();
        assert_eq!(lattice.dividend_step(), Some(45));
        assert_eq!(lattice.calibration_warnings(), 0);
    }

    #[test]
    fn test_non_positive_forward_is_reported() {
        // Dividend larger than every grown node price of the first step.
        let market = MarketParameters::new(1.0, 0.0, 0.2)
            .unwrap()
            .with_dividend(5.0, Date::from_ymd(2025, 1, 10).unwrap())
            .unwrap();
        let err = build_lattice(&market, &one_year(), 4).unwrap_err();
        assert!(matches!(err, LatticeError::NonPositiveForward { step: 0, .. }));
    }
}
