use super::*;
use crate::{
    correlation::{CorrelationOracle, validate_entries},
    errors::QiroError,
    graph::{NumEdges, NumNodes},
};
use log::info;

/// Statistics of a single reduction round
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundReport {
    pub entry: CorrelationEntry,
    pub rank: usize,
    pub nodes_removed: NumNodes,
    pub edges_removed: NumEdges,
    pub solution_added: usize,
}

/// Runs one round: measure correlations, then apply the strongest applicable entry
pub struct Reducer<O, R> {
    oracle: O,
    simplifier: Simplifier<R>,
}

impl<O: CorrelationOracle, R: SimplificationRule> Reducer<O, R> {
    pub fn new(oracle: O, rules: R) -> Self {
        Self {
            oracle,
            simplifier: Simplifier::new(rules),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn simplifier(&self) -> &Simplifier<R> {
        &self.simplifier
    }

    /// Mutates `problem` and `solution` in place. Oracle failures and entry sets not
    /// matching the current graph are returned unchanged as [`QiroError::Oracle`].
    pub fn reduce(
        &self,
        problem: &mut Problem,
        solution: &mut Solution,
    ) -> Result<RoundReport, QiroError> {
        let before_nodes = problem.number_of_nodes();
        let before_edges = problem.number_of_edges();
        let before_solution = solution.len();

        let entries = self.oracle.compute(problem)?;
        validate_entries(problem, &entries)?;

        let applied = self.simplifier.simplify(problem, solution, &entries)?;

        let report = RoundReport {
            entry: applied.entry,
            rank: applied.rank,
            nodes_removed: before_nodes - problem.number_of_nodes(),
            edges_removed: before_edges - problem.number_of_edges(),
            solution_added: solution.len() - before_solution,
        };

        info!(
            "{} {} n -= {}, m -= {}, |S| += {}, rank={}",
            R::NAME,
            report.entry,
            report.nodes_removed,
            report.edges_removed,
            report.solution_added,
            report.rank
        );

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        correlation::{FnOracle, TableOracle},
        errors::OracleError,
        problem::ProblemKind,
    };

    #[test]
    fn single_round() {
        let mut problem = Problem::from_edges(ProblemKind::MinVertexCover, 2, [(0, 1)]).unwrap();
        let mut solution = Solution::new();

        let reducer = Reducer::new(TableOracle::uniform(0.1, 0.3), VertexCoverRules::new());
        let report = reducer.reduce(&mut problem, &mut solution).unwrap();

        assert_eq!(report.entry, CorrelationEntry::two_points(0, 1, 0.3));
        assert_eq!(report.nodes_removed, 2);
        assert_eq!(report.edges_removed, 1);
        assert_eq!(report.solution_added, 2);
        assert_eq!(solution.sorted(), [0, 1]);
    }

    #[test]
    fn oracle_errors_propagate() {
        let mut problem = Problem::from_edges(ProblemKind::MinVertexCover, 2, [(0, 1)]).unwrap();
        let mut solution = Solution::new();

        let failing = FnOracle(|_: &Problem| -> Result<Vec<CorrelationEntry>, OracleError> {
            Err(OracleError::Backend("diverged".into()))
        });
        let reducer = Reducer::new(failing, VertexCoverRules::new());

        assert_eq!(
            reducer.reduce(&mut problem, &mut solution),
            Err(QiroError::Oracle(OracleError::Backend("diverged".into())))
        );
        assert_eq!(problem.number_of_edges(), 1);
    }

    #[test]
    fn truncated_entries_are_rejected() {
        let mut problem = Problem::from_edges(ProblemKind::MinVertexCover, 2, [(0, 1)]).unwrap();
        let mut solution = Solution::new();

        let truncated = FnOracle(|_: &Problem| -> Result<Vec<CorrelationEntry>, OracleError> {
            Ok(vec![CorrelationEntry::one_point(0, -1.0)])
        });
        let result =
            Reducer::new(truncated, VertexCoverRules::new()).reduce(&mut problem, &mut solution);

        assert!(matches!(result, Err(QiroError::Oracle(OracleError::Malformed(_)))));
        assert!(solution.is_empty());
    }
}
