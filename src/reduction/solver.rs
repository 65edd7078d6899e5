use super::*;
use crate::{
    algorithm::{IterativeAlgorithm, TerminatingIterativeAlgorithm},
    correlation::CorrelationOracle,
    errors::{ConfigurationError, QiroError},
    problem::ProblemKind,
};
use log::info;

/// Drives the fixpoint loop: reduce until no edge is left
pub struct QiroSolver<O, R> {
    reducer: Reducer<O, R>,
}

/// Outcome of a traced solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub kind: ProblemKind,
    pub solution: Solution,
    pub rounds: Vec<RoundReport>,
}

impl<O: CorrelationOracle, R: SimplificationRule> QiroSolver<O, R> {
    pub fn new(oracle: O, rules: R) -> Self {
        Self::from_reducer(Reducer::new(oracle, rules))
    }

    pub fn from_reducer(reducer: Reducer<O, R>) -> Self {
        Self { reducer }
    }

    pub fn reducer(&self) -> &Reducer<O, R> {
        &self.reducer
    }

    /// Prepares a step-wise run on a private copy of `problem`.
    ///
    /// Fails with [`QiroError::InvalidProblemConfiguration`] if the rules do not belong to
    /// the family of `problem`.
    pub fn start<'a>(&'a self, problem: &Problem) -> Result<QiroRun<'a, O, R>, QiroError> {
        let rules = self.reducer.simplifier().rules().family();
        if rules != problem.family() {
            return Err(ConfigurationError::RuleFamilyMismatch {
                problem: problem.kind(),
                rules,
            }
            .into());
        }

        Ok(QiroRun {
            reducer: &self.reducer,
            max_rounds: problem.number_of_nodes() as usize,
            problem: problem.copy(),
            solution: Solution::new(),
            rounds: Vec::new(),
        })
    }

    /// Reduces a copy of `problem` until it has no edges and returns the accumulated
    /// solution. `problem` itself is left untouched. Any error aborts the solve.
    pub fn solve(&self, problem: &Problem) -> Result<Solution, QiroError> {
        Ok(self.solve_with_trace(problem)?.solution)
    }

    /// As [`QiroSolver::solve`] but also returns the statistics of every round
    pub fn solve_with_trace(&self, problem: &Problem) -> Result<SolveReport, QiroError> {
        info!(
            "Start {} solve: n={}, m={}",
            problem.kind(),
            problem.number_of_nodes(),
            problem.number_of_edges()
        );

        let mut run = self.start(problem)?;
        run.run_to_completion()?;

        info!(
            "Finished after {} rounds with |S| = {}",
            run.rounds.len(),
            run.solution.len()
        );

        Ok(run.into_report())
    }
}

/// A solve in progress; each step is one reduction round
pub struct QiroRun<'a, O, R> {
    reducer: &'a Reducer<O, R>,
    max_rounds: usize,
    problem: Problem,
    solution: Solution,
    rounds: Vec<RoundReport>,
}

impl<O, R> QiroRun<'_, O, R> {
    /// The remaining graph
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn rounds(&self) -> &[RoundReport] {
        &self.rounds
    }

    pub fn into_report(self) -> SolveReport {
        SolveReport {
            kind: self.problem.kind(),
            solution: self.solution,
            rounds: self.rounds,
        }
    }
}

impl<O: CorrelationOracle, R: SimplificationRule> IterativeAlgorithm for QiroRun<'_, O, R> {
    type Solution = Solution;
    type Error = QiroError;

    fn execute_step(&mut self) -> Result<(), QiroError> {
        let round = self.rounds.len() + 1;
        if round > self.max_rounds {
            return Err(QiroError::Stalled { round });
        }

        let report = self.reducer.reduce(&mut self.problem, &mut self.solution)?;

        if report.nodes_removed == 0 {
            return Err(QiroError::Stalled { round });
        }

        self.rounds.push(report);
        Ok(())
    }

    fn is_completed(&self) -> bool {
        self.problem.number_of_edges() == 0
    }

    fn current_solution(&self) -> &Solution {
        &self.solution
    }
}

impl<O: CorrelationOracle, R: SimplificationRule> TerminatingIterativeAlgorithm
    for QiroRun<'_, O, R>
{
}
