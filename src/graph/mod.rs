pub mod adj_array;
pub mod complement;
pub mod connectivity;
pub mod edge;
pub mod gnp;
pub mod graph_tests;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

use std::ops::Range;

pub use adj_array::*;
pub use complement::*;
pub use connectivity::*;
pub use edge::*;
pub use gnp::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph that have not been removed
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V in ascending order of labels.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns a range of labels possibly including removed (or never used) labels.
    /// In contrast to self.vertices(), the range returned by self.vertices_range() does
    /// not borrow self and hence may be used where additional mutable references of self are needed
    ///
    /// # Warning
    /// It is the responsibility of the caller to skip labels for which
    /// [`GraphNodeOrder::has_vertex`] is false.
    fn vertices_range(&self) -> Range<Node>;

    /// Returns true if `u` is a label of a node currently in the graph
    fn has_vertex(&self, u: Node) -> bool;

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns a slice of neighbors of a given vertex.
    /// ** Panics if u is not a label of this graph **
    fn neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of neighbors of from [`u`]
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(move |u| self.degree_of(u))
    }

    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns all nodes with degree zero
    fn isolated_vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(move |&u| self.degree_of(u) == 0)
    }

    /// Returns all nodes with at least one neighbor
    fn vertices_with_neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(move |&u| self.degree_of(u) > 0)
    }

    /// Returns an iterator over all edges. If `only_normalized` is true, each
    /// undirected edge is reported once as `Edge(u, v)` with `u <= v`.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices().flat_map(move |u| {
            self.neighbors_of(u)
                .iter()
                .filter(move |&&v| !only_normalized || u <= v)
                .map(move |&v| Edge(u, v))
        })
    }

    /// Same as [`AdjacencyList::edges`] with `only_normalized = true`, but sorted
    /// lexicographically.
    fn ordered_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges(true).collect();
        edges.sort_unstable();
        edges
    }
}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains the edge {u, v}
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes labelled `0..n`
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the undirected edge *{u,v}* to the graph.
    /// ** Panics if the edge is already contained or if u, v are not in the graph **
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_add_edge(u, v))
    }

    /// Adds the undirected edge *{u,v}* to the graph.
    /// Returns *true* exactly if the edge was not present previously.
    /// ** Panics if u, v are not in the graph **
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool;

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }

    /// Removes the undirected edge *{u,v}* from the graph.
    /// ** Panics if the edge is not present **
    fn remove_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_remove_edge(u, v))
    }

    /// Removes the undirected edge *{u,v}* from the graph.
    /// If the edge was removed, returns *true* and *false* otherwise (including the case
    /// that either endpoint is not part of the graph).
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;

    /// Removes all edges incident to node u. Returns the number of removed edges.
    fn remove_edges_at_node(&mut self, u: Node) -> NumEdges;
}

/// Provides functions to delete nodes. Labels of removed nodes are never reused.
pub trait GraphNodeEditing {
    /// Removes `u` and all incident edges. Returns false if `u` was not in the graph.
    fn try_remove_node(&mut self, u: Node) -> bool;

    /// Removes all nodes in `nodes`, ignoring those that are not (or no longer) present.
    /// Returns the number of nodes actually removed.
    fn remove_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> NumNodes {
        nodes
            .into_iter()
            .map(|u| self.try_remove_node(u) as NumNodes)
            .sum()
    }
}

/// Convenience trait bundling everything the reduction engine needs from a graph
pub trait FullfledgedGraph:
    Clone
    + AdjacencyList
    + AdjacencyTest
    + GraphEdgeOrder
    + GraphEdgeEditing
    + GraphNodeEditing
    + std::fmt::Debug
{
}

impl<G> FullfledgedGraph for G where
    G: Clone
        + AdjacencyList
        + AdjacencyTest
        + GraphEdgeOrder
        + GraphEdgeEditing
        + GraphNodeEditing
        + std::fmt::Debug
{
}
