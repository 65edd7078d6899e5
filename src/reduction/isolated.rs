use super::*;
use log::debug;

/// Removes all nodes without incident edges. For the independent-set family the removed
/// nodes join the solution first; for vertex cover they are dropped.
///
/// Returns the number of removed nodes.
pub fn sweep_isolated_nodes(
    family: RuleFamily,
    problem: &mut Problem,
    solution: &mut Solution,
) -> usize {
    let isolated = problem.isolated_nodes();
    if isolated.is_empty() {
        return 0;
    }

    if family == RuleFamily::IndependentSet {
        solution.add_nodes(isolated.iter().copied());
    }

    let removed = problem.remove_nodes(isolated.iter().copied()) as usize;
    debug!("RuleIsolated ({family}) removed {removed} nodes: {isolated:?}");

    removed
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::problem::ProblemKind;

    fn problem(kind: ProblemKind) -> Problem {
        // 2 and 4 are isolated
        Problem::from_edges(kind, 5, [(0, 1), (1, 3)]).unwrap()
    }

    #[test]
    fn vertex_cover_drops() {
        let mut problem = problem(ProblemKind::MinVertexCover);
        let mut solution = Solution::new();

        assert_eq!(
            sweep_isolated_nodes(RuleFamily::VertexCover, &mut problem, &mut solution),
            2
        );
        assert!(solution.is_empty());
        assert_eq!(problem.nodes().collect::<Vec<_>>(), [0, 1, 3]);
    }

    #[test]
    fn independent_set_selects() {
        let mut problem = problem(ProblemKind::MaxIndependentSet);
        let mut solution = Solution::new();

        assert_eq!(
            sweep_isolated_nodes(RuleFamily::IndependentSet, &mut problem, &mut solution),
            2
        );
        assert_eq!(solution.sorted(), [2, 4]);
        assert_eq!(problem.number_of_nodes(), 3);

        // nothing left to sweep
        assert_eq!(
            sweep_isolated_nodes(RuleFamily::IndependentSet, &mut problem, &mut solution),
            0
        );
    }
}
