use super::*;
use log::{debug, trace};

/// Elimination rules for maximum independent set (and max-clique on the complement).
///
/// - one-point, `c <= 0`: the node joins the set; it and its neighbors are removed.
/// - one-point, `c > 0`: the node is removed.
/// - two-points, `c < 0`: at most one endpoint ends up selected, so the common neighbors
///   of `u` and `v` are removed. Not applicable without common neighbors.
/// - two-points, `c >= 0`: both endpoints are removed.
///
/// Isolated nodes join the set before they are removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndependentSetRules {
    one_point: Polarity,
    two_points: Polarity,
}

impl IndependentSetRules {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_polarity(one_point: Polarity, two_points: Polarity) -> Self {
        Self {
            one_point,
            two_points,
        }
    }
}

impl SimplificationRule for IndependentSetRules {
    const NAME: &'static str = "RuleIndependentSet";

    fn family(&self) -> RuleFamily {
        RuleFamily::IndependentSet
    }

    fn apply_one_point(
        &self,
        node: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        if self.one_point.orient(correlation) <= 0.0 {
            let neighbors = problem.neighbors(node).to_vec();
            debug!(
                "{} node {node} selected (c={correlation:.4}), excluding {neighbors:?}",
                Self::NAME
            );

            solution.add_node(node);
            problem.remove_node(node);
            problem.remove_nodes(neighbors);
        } else {
            debug!("{} node {node} excluded (c={correlation:.4})", Self::NAME);
            problem.remove_node(node);
        }

        sweep_isolated_nodes(RuleFamily::IndependentSet, problem, solution);
        RuleOutcome::Applied
    }

    fn apply_two_points(
        &self,
        u: Node,
        v: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        if self.two_points.orient(correlation) < 0.0 {
            let common = problem.common_neighbors(u, v);
            if common.is_empty() {
                trace!(
                    "{} edge ({u}, {v}) anti-correlated without common neighbors",
                    Self::NAME
                );
                return RuleOutcome::NotApplicable;
            }

            debug!(
                "{} edge ({u}, {v}) anti-correlated (c={correlation:.4}), excluding common neighbors {common:?}",
                Self::NAME
            );
            problem.remove_nodes(common);
        } else {
            debug!(
                "{} edge ({u}, {v}) correlated (c={correlation:.4}), excluding both",
                Self::NAME
            );
            problem.remove_nodes([u, v]);
        }

        sweep_isolated_nodes(RuleFamily::IndependentSet, problem, solution);
        RuleOutcome::Applied
    }
}
