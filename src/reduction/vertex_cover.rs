use super::*;
use log::debug;

/// Elimination rules for minimum vertex cover.
///
/// - one-point, `c >= 0`: the node stays out of the cover, so all its neighbors join it;
///   the node and its neighbors are removed.
/// - one-point, `c < 0`: the node joins the cover and is removed.
/// - two-points, `c < 0`: the endpoint of larger degree joins the cover and is removed
///   (`v` on ties).
/// - two-points, `c >= 0`: both endpoints join the cover and are removed.
///
/// Every branch applies; isolated nodes are dropped afterwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VertexCoverRules {
    one_point: Polarity,
    two_points: Polarity,
}

impl VertexCoverRules {
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

impl SimplificationRule for VertexCoverRules {
    const NAME: &'static str = "RuleVertexCover";

    fn family(&self) -> RuleFamily {
        RuleFamily::VertexCover
    }

    fn apply_one_point(
        &self,
        node: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        if self.one_point.orient(correlation) >= 0.0 {
            let neighbors = problem.neighbors(node).to_vec();
            debug!(
                "{} node {node} excluded (c={correlation:.4}), covering neighbors {neighbors:?}",
                Self::NAME
            );

            solution.add_nodes(neighbors.iter().copied());
            problem.remove_nodes(neighbors);
            problem.remove_node(node);
        } else {
            debug!(
                "{} node {node} included (c={correlation:.4})",
                Self::NAME
            );

            solution.add_node(node);
            problem.remove_node(node);
        }

        sweep_isolated_nodes(RuleFamily::VertexCover, problem, solution);
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
            let chosen = if problem.degree(v) >= problem.degree(u) {
                v
            } else {
                u
            };
            debug!(
                "{} edge ({u}, {v}) anti-correlated (c={correlation:.4}), covering {chosen}",
                Self::NAME
            );

            solution.add_node(chosen);
            problem.remove_node(chosen);
        } else {
            debug!(
                "{} edge ({u}, {v}) correlated (c={correlation:.4}), covering both",
                Self::NAME
            );

            solution.add_nodes([u, v]);
            problem.remove_nodes([u, v]);
        }

        sweep_isolated_nodes(RuleFamily::VertexCover, problem, solution);
        RuleOutcome::Applied
    }
}
