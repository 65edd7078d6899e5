use super::{
    correlation::{CorrelationEntry, canonical_entries},
    errors::OracleError,
    graph::*,
    problem::{Problem, ProblemKind},
    utils::Solution,
};
use rand::Rng;
use std::ops::Range;

pub const ALL_KINDS: [ProblemKind; 3] = [
    ProblemKind::MinVertexCover,
    ProblemKind::MaxIndependentSet,
    ProblemKind::MaxClique,
];

/// Endless stream of random `G(n, p)` graphs with `n` drawn from `nodes` and an average
/// degree of roughly three, together with the problem of `kind` built from them.
pub fn random_problems(
    rng: &mut impl Rng,
    kind: ProblemKind,
    nodes: Range<NumNodes>,
) -> impl Iterator<Item = (AdjArray, Problem)> + '_ {
    std::iter::repeat_with(move || {
        let n = rng.gen_range(nodes.clone());
        let graph = AdjArray::random_gnp(&mut *rng, n, (3.0 / n as f64).min(1.0));
        let problem = Problem::new(kind, graph.clone()).unwrap();
        (graph, problem)
    })
}

/// Asserts that `solution` solves `kind` on the original `graph` (not necessarily optimal)
pub fn assert_valid_solution(kind: ProblemKind, graph: &AdjArray, solution: &Solution) {
    assert!(solution.iter().all(|u| graph.has_vertex(u)));

    match kind {
        ProblemKind::MinVertexCover => assert!(
            solution.is_vertex_cover(graph),
            "uncovered edges {:?} in {graph:?}",
            solution.uncovered_edges(graph)
        ),
        ProblemKind::MaxIndependentSet => assert!(
            solution.is_independent_set(graph),
            "conflicting edges {:?} in {graph:?}",
            solution.violating_edges(graph)
        ),
        ProblemKind::MaxClique => assert!(
            solution.is_clique(graph),
            "{:?} is not a clique in {graph:?}",
            solution.sorted()
        ),
    }
}

/// Deterministic pseudo-random scores in `[-1, 1]` derived from the labels only, so the
/// same node or edge keeps its score across rounds
pub fn hashed_scores(problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
    let score = |u: Node, v: Node| {
        let h = fxhash::hash64(&(u, v, 0x9e37_79b9u32));
        (h % 2001) as f64 / 1000.0 - 1.0
    };

    canonical_entries(problem, |u| Ok(score(u, u)), |Edge(u, v)| Ok(score(u, v)))
}
