//! The mutable problem instance the reduction engine works on.
//!
//! A [`Problem`] owns one simple undirected graph and knows which combinatorial problem it
//! encodes. All mutators tolerate nodes and edges that are already gone, since rules compute
//! their targets from the graph state at the time the correlations were measured.

use crate::{
    errors::{GraphError, InvariantCheck, QiroError},
    graph::*,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The optimization problem encoded by a [`Problem`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    #[default]
    MinVertexCover,
    MaxIndependentSet,
    /// Solved as maximum independent set on the complement graph
    MaxClique,
}

/// Groups problem kinds that share the same elimination rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    VertexCover,
    IndependentSet,
}

impl ProblemKind {
    pub fn family(self) -> RuleFamily {
        match self {
            ProblemKind::MinVertexCover => RuleFamily::VertexCover,
            ProblemKind::MaxIndependentSet | ProblemKind::MaxClique => RuleFamily::IndependentSet,
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProblemKind::MinVertexCover => "min-vertex-cover",
            ProblemKind::MaxIndependentSet => "max-independent-set",
            ProblemKind::MaxClique => "max-clique",
        })
    }
}

impl FromStr for ProblemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "vc" | "mvc" | "vertex-cover" | "min-vertex-cover" => Ok(ProblemKind::MinVertexCover),
            "is" | "mis" | "independent-set" | "max-independent-set" => {
                Ok(ProblemKind::MaxIndependentSet)
            }
            "clique" | "max-clique" => Ok(ProblemKind::MaxClique),
            other => Err(format!("unknown problem kind \"{other}\"")),
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleFamily::VertexCover => "vertex-cover",
            RuleFamily::IndependentSet => "independent-set",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Problem {
    kind: ProblemKind,
    graph: AdjArray,
}

impl Problem {
    /// Wraps `graph` as an instance of `kind`. For [`ProblemKind::MaxClique`] the stored graph
    /// is the complement of `graph`.
    ///
    /// Fails with [`QiroError::InvalidProblemConfiguration`] if `graph` contains self-loops
    /// or is otherwise inconsistent.
    pub fn new(kind: ProblemKind, graph: AdjArray) -> Result<Self, QiroError> {
        graph.is_correct()?;

        let graph = match kind {
            ProblemKind::MaxClique => graph.complement_graph(),
            _ => graph,
        };

        Ok(Self { kind, graph })
    }

    /// Creates a problem on nodes `0..n` with the given edges.
    ///
    /// Fails with [`GraphError::NodeOutOfRange`] if an endpoint is not below `n`.
    pub fn from_edges(
        kind: ProblemKind,
        n: NumNodes,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Result<Self, QiroError> {
        let mut graph = AdjArray::new(n);
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            if u >= n || v >= n {
                return Err(GraphError::NodeOutOfRange(u, v, n).into());
            }
            graph.try_add_edge(u, v);
        }

        Self::new(kind, graph)
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn family(&self) -> RuleFamily {
        self.kind.family()
    }

    pub fn graph(&self) -> &AdjArray {
        &self.graph
    }

    /// Returns an independently mutable copy of this problem
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Removes `u` with all incident edges; returns false if `u` is not present
    pub fn remove_node(&mut self, u: Node) -> bool {
        self.graph.try_remove_node(u)
    }

    /// Removes all present nodes of `nodes`; returns how many were removed
    pub fn remove_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> NumNodes {
        self.graph.remove_nodes(nodes)
    }

    pub fn remove_edge(&mut self, u: Node, v: Node) -> bool {
        self.graph.try_remove_edge(u, v)
    }

    pub fn remove_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) -> NumEdges {
        edges
            .into_iter()
            .map(|e| {
                let Edge(u, v) = e.into();
                self.graph.try_remove_edge(u, v) as NumEdges
            })
            .sum()
    }

    /// Degree of `u`; zero if `u` is not present
    pub fn degree(&self, u: Node) -> NumNodes {
        self.neighbors(u).len() as NumNodes
    }

    /// Neighbors of `u`; empty if `u` is not present
    pub fn neighbors(&self, u: Node) -> &[Node] {
        if self.graph.has_vertex(u) {
            self.graph.neighbors_of(u)
        } else {
            &[]
        }
    }

    pub fn common_neighbors(&self, u: Node, v: Node) -> Vec<Node> {
        self.graph.common_neighbors(u, v)
    }

    pub fn has_node(&self, u: Node) -> bool {
        self.graph.has_vertex(u)
    }

    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.graph.has_edge(u, v)
    }

    /// Nodes in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.graph.vertices()
    }

    /// Edges `(u, v)` with `u < v` in lexicographic order
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.ordered_edges()
    }

    /// Nodes without incident edges in ascending order
    pub fn isolated_nodes(&self) -> Vec<Node> {
        self.graph.isolated_vertices().collect()
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}
