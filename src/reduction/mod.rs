//! Elimination rules and the round/fixpoint machinery driving them.
//!
//! A round asks a [`CorrelationOracle`](crate::correlation::CorrelationOracle) for scores on
//! the current graph, ranks them by magnitude and applies the first entry whose rule reports
//! [`RuleOutcome::Applied`]. Every applied rule removes at least one node, so the fixpoint
//! loop in [`QiroSolver`] ends after at most `|V|` rounds.

pub mod independent_set;
pub use independent_set::IndependentSetRules;
pub mod isolated;
pub use isolated::sweep_isolated_nodes;
pub mod reducer;
pub use reducer::{Reducer, RoundReport};
pub mod rule_set;
pub use rule_set::RuleSet;
pub mod simplifier;
pub use simplifier::{AppliedEntry, Simplifier};
pub mod solver;
pub use solver::{QiroRun, QiroSolver, SolveReport};
pub mod vertex_cover;
pub use vertex_cover::VertexCoverRules;

use crate::{
    correlation::CorrelationEntry,
    graph::Node,
    problem::{Problem, RuleFamily},
    utils::Solution,
};
use serde::{Deserialize, Serialize};

/// Result of offering a correlation entry to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule mutated the problem (and possibly the solution)
    Applied,
    /// The rule left problem and solution untouched; the next entry should be tried
    NotApplicable,
}

impl RuleOutcome {
    pub fn is_applied(self) -> bool {
        self == RuleOutcome::Applied
    }
}

/// How the sign of a score is read by a rule.
///
/// With [`Polarity::Standard`] the rules follow the convention `Z = +1` for "not selected"
/// and `Z = -1` for "selected". [`Polarity::Inverted`] negates every score before the rule
/// inspects it, which matches backends using the opposite convention.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    Standard,
    Inverted,
}

impl Polarity {
    pub fn orient(self, correlation: f64) -> f64 {
        match self {
            Polarity::Standard => correlation,
            Polarity::Inverted => -correlation,
        }
    }
}

impl std::str::FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(Polarity::Standard),
            "inverted" | "inv" => Ok(Polarity::Inverted),
            other => Err(format!("unknown polarity \"{other}\"")),
        }
    }
}

/// Problem-specific elimination logic for one-point (node) and two-point (edge) entries.
///
/// Implementations hold no mutable state. A rule returning [`RuleOutcome::NotApplicable`]
/// must not have modified `problem` or `solution`. After any mutation the rule sweeps
/// isolated nodes according to its [`RuleFamily`].
pub trait SimplificationRule {
    const NAME: &'static str;

    fn family(&self) -> RuleFamily;

    fn apply_one_point(
        &self,
        node: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome;

    fn apply_two_points(
        &self,
        u: Node,
        v: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome;

    /// Dispatches `entry` to the one-point or two-point rule
    fn apply(
        &self,
        entry: &CorrelationEntry,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        let (u, v) = entry.pair;
        if entry.is_one_point() {
            self.apply_one_point(u, entry.score, problem, solution)
        } else {
            self.apply_two_points(u, v, entry.score, problem, solution)
        }
    }
}

impl<R: SimplificationRule> SimplificationRule for &R {
    const NAME: &'static str = R::NAME;

    fn family(&self) -> RuleFamily {
        (**self).family()
    }

    fn apply_one_point(
        &self,
        node: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        (**self).apply_one_point(node, correlation, problem, solution)
    }

    fn apply_two_points(
        &self,
        u: Node,
        v: Node,
        correlation: f64,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> RuleOutcome {
        (**self).apply_two_points(u, v, correlation, problem, solution)
    }
}
