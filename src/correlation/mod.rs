//! Correlation signals consumed by the reduction engine.
//!
//! An oracle measures, for the current graph, one score per node (`⟨Z_i⟩`) and one score
//! per edge (`⟨Z_i Z_j⟩`). With the convention `Z = +1` for "not selected" and `Z = -1`
//! for "selected", a negative one-point score means the node tends to be part of the
//! solution. The engine only relies on sign and relative magnitude of the scores.

pub mod exact;
pub mod sampling;
pub mod table;

pub use exact::ExactOracle;
pub use sampling::SamplingOracle;
pub use table::TableOracle;

use crate::{errors::OracleError, graph::*, problem::Problem};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scored measurement on a single node (`pair.0 == pair.1`) or on an edge
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub score: f64,
    pub pair: (Node, Node),
}

impl CorrelationEntry {
    pub fn one_point(node: Node, score: f64) -> Self {
        Self {
            score,
            pair: (node, node),
        }
    }

    /// Two-point entry; the pair is stored with the smaller label first
    pub fn two_points(u: Node, v: Node, score: f64) -> Self {
        Self {
            score,
            pair: (u.min(v), u.max(v)),
        }
    }

    pub fn is_one_point(&self) -> bool {
        self.pair.0 == self.pair.1
    }

    pub fn magnitude(&self) -> f64 {
        self.score.abs()
    }

    pub fn edge(&self) -> Edge {
        Edge(self.pair.0, self.pair.1)
    }
}

impl fmt::Display for CorrelationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one_point() {
            write!(f, "<Z_{}> = {:.4}", self.pair.0, self.score)
        } else {
            write!(
                f,
                "<Z_{} Z_{}> = {:.4}",
                self.pair.0, self.pair.1, self.score
            )
        }
    }
}

/// Source of correlation entries for the current state of a [`Problem`].
///
/// Implementations must return exactly one one-point entry for every node and one
/// two-point entry for every edge of `problem` (`|V| + |E|` entries in total) or fail
/// with an [`OracleError`]. A truncated entry set is never acceptable.
pub trait CorrelationOracle {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError>;
}

impl<O: CorrelationOracle + ?Sized> CorrelationOracle for &O {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        (**self).compute(problem)
    }
}

impl<O: CorrelationOracle + ?Sized> CorrelationOracle for Box<O> {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        (**self).compute(problem)
    }
}

/// Adapts a closure into a [`CorrelationOracle`]
pub struct FnOracle<F>(pub F);

impl<F> CorrelationOracle for FnOracle<F>
where
    F: Fn(&Problem) -> Result<Vec<CorrelationEntry>, OracleError>,
{
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        (self.0)(problem)
    }
}

/// Builds the entry set in canonical order: one-point entries in ascending node order,
/// followed by two-point entries in lexicographic edge order.
pub fn canonical_entries(
    problem: &Problem,
    mut one_point: impl FnMut(Node) -> Result<f64, OracleError>,
    mut two_points: impl FnMut(Edge) -> Result<f64, OracleError>,
) -> Result<Vec<CorrelationEntry>, OracleError> {
    let edges = problem.edges();
    let mut entries = Vec::with_capacity(problem.number_of_nodes() as usize + edges.len());

    for u in problem.nodes() {
        entries.push(CorrelationEntry::one_point(u, one_point(u)?));
    }

    for edge in edges {
        entries.push(CorrelationEntry::two_points(edge.0, edge.1, two_points(edge)?));
    }

    Ok(entries)
}

/// Checks that `entries` covers every node and every edge of `problem` exactly once and
/// that all scores are finite.
pub fn validate_entries(problem: &Problem, entries: &[CorrelationEntry]) -> Result<(), OracleError> {
    let expected = problem.number_of_nodes() as usize + problem.number_of_edges() as usize;
    if entries.len() != expected {
        return Err(OracleError::Malformed(format!(
            "expected {expected} entries for {} nodes and {} edges, got {}",
            problem.number_of_nodes(),
            problem.number_of_edges(),
            entries.len()
        )));
    }

    let mut seen: FxHashSet<Edge> = FxHashSet::default();
    for entry in entries {
        if !entry.score.is_finite() {
            return Err(OracleError::Malformed(format!(
                "non-finite score for {}",
                entry.edge()
            )));
        }

        let (u, v) = entry.pair;
        let current = if u == v {
            problem.has_node(u)
        } else {
            problem.has_edge(u, v)
        };

        if !current {
            return Err(OracleError::Malformed(format!(
                "{} is not part of the current graph",
                entry.edge()
            )));
        }

        if !seen.insert(entry.edge().normalized()) {
            return Err(OracleError::Malformed(format!(
                "duplicate entry for {}",
                entry.edge()
            )));
        }
    }

    Ok(())
}
