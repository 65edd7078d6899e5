use super::*;
use crate::problem::ProblemKind;

/// The rule family bound to a problem kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    VertexCover(VertexCoverRules),
    IndependentSet(IndependentSetRules),
}

impl RuleSet {
    pub fn for_family(family: RuleFamily, one_point: Polarity, two_points: Polarity) -> Self {
        match family {
            RuleFamily::VertexCover => {
                RuleSet::VertexCover(VertexCoverRules::with_polarity(one_point, two_points))
            }
            RuleFamily::IndependentSet => {
                RuleSet::IndependentSet(IndependentSetRules::with_polarity(one_point, two_points))
            }
        }
    }

    pub fn for_kind(kind: ProblemKind, one_point: Polarity, two_points: Polarity) -> Self {
        Self::for_family(kind.family(), one_point, two_points)
    }
}

impl From<VertexCoverRules> for RuleSet {
    fn from(rules: VertexCoverRules) -> Self {
        RuleSet::VertexCover(rules)
    }
}

impl From<IndependentSetRules> for RuleSet {
    fn from(rules: IndependentSetRules) -> Self {
        RuleSet::IndependentSet(rules)
    }
}

impl SimplificationRule for RuleSet {
    const NAME: &'static str = "RuleSet";

    fn family(&self) -> RuleFamily {
        match self {
            RuleSet::VertexCover(r) => r.family(),
            RuleSet::IndependentSet(r) => r.family(),
        }
    }

    fn apply_one_point(
        &self,
        node: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        match self {
            RuleSet::VertexCover(r) => r.apply_one_point(node, correlation, problem, solution),
            RuleSet::IndependentSet(r) => r.apply_one_point(node, correlation, problem, solution),
        }
    }

    fn apply_two_points(
        &self,
        u: Node,
        v: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        match self {
            RuleSet::VertexCover(r) => r.apply_two_points(u, v, correlation, problem, solution),
            RuleSet::IndependentSet(r) => r.apply_two_points(u, v, correlation, problem, solution),
        }
    }
}
