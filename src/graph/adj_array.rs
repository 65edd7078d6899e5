use super::*;
use crate::errors::{GraphError, InvariantCheck};
use smallvec::SmallVec;
use std::fmt;

type Neighborhood = SmallVec<[Node; 8]>;

/// Adjacency array of an undirected simple graph. Nodes are identified by stable labels;
/// removing a node keeps its slot (with an empty neighborhood) so that labels are never reused.
#[derive(Clone, Default)]
pub struct AdjArray {
    adj: Vec<Neighborhood>,
    present: Vec<bool>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
            .filter(move |&u| self.present[u as usize])
    }

    fn vertices_range(&self) -> Range<Node> {
        0..self.adj.len() as Node
    }

    fn has_vertex(&self, u: Node) -> bool {
        self.present.get(u as usize).copied().unwrap_or(false)
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl AdjacencyList for AdjArray {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        &self.adj[u as usize]
    }
}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return false;
        }

        // scan the smaller neighborhood
        let (a, b) = if self.degree_of(u) <= self.degree_of(v) {
            (u, v)
        } else {
            (v, u)
        };

        self.adj[a as usize].contains(&b)
    }
}

impl GraphNew for AdjArray {
    fn new(number_of_nodes: NumNodes) -> Self {
        Self {
            adj: vec![Default::default(); number_of_nodes as usize],
            present: vec![true; number_of_nodes as usize],
            number_of_nodes,
            number_of_edges: 0,
        }
    }
}

impl GraphEdgeEditing for AdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        assert!(
            self.has_vertex(u) && self.has_vertex(v),
            "edge ({u}, {v}) has an endpoint outside the graph"
        );

        if self.has_edge(u, v) {
            return false;
        }

        self.adj[u as usize].push(v);
        if u != v {
            self.adj[v as usize].push(u);
        }
        self.number_of_edges += 1;

        true
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return false;
        }

        let Some(pos) = self.adj[u as usize].iter().position(|&x| x == v) else {
            return false;
        };
        self.adj[u as usize].swap_remove(pos);

        if u != v {
            let pos = self.adj[v as usize].iter().position(|&x| x == u);
            debug_assert!(pos.is_some());
            if let Some(pos) = pos {
                self.adj[v as usize].swap_remove(pos);
            }
        }

        self.number_of_edges -= 1;
        true
    }

    fn remove_edges_at_node(&mut self, u: Node) -> NumEdges {
        if !self.has_vertex(u) {
            return 0;
        }

        let neighbors = std::mem::take(&mut self.adj[u as usize]);
        for &v in &neighbors {
            if v == u {
                continue;
            }

            let pos = self.adj[v as usize].iter().position(|&x| x == u);
            assert!(pos.is_some(), "asymmetric edge ({u}, {v})");
            if let Some(pos) = pos {
                self.adj[v as usize].swap_remove(pos);
            }
        }

        let removed = neighbors.len() as NumEdges;
        self.number_of_edges -= removed;
        removed
    }
}

impl GraphNodeEditing for AdjArray {
    fn try_remove_node(&mut self, u: Node) -> bool {
        if !self.has_vertex(u) {
            return false;
        }

        self.remove_edges_at_node(u);
        self.present[u as usize] = false;
        self.number_of_nodes -= 1;
        true
    }
}

impl AdjArray {
    /// Creates an edgeless graph whose vertex set is exactly `nodes`. Labels do not need
    /// to be contiguous; duplicates are ignored.
    pub fn with_vertices(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut graph = Self::default();
        for u in nodes {
            graph.insert_vertex(u);
        }
        graph
    }

    /// Creates a graph with nodes `0..n` and the given edges. Parallel edges collapse into one.
    pub fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut graph = Self::new(n);
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            graph.try_add_edge(u, v);
        }
        graph
    }

    /// Creates a graph on the union of `nodes` and all edge endpoints.
    pub fn from_sparse_edges(
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Self {
        let mut graph = Self::with_vertices(nodes);
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            graph.insert_vertex(u);
            graph.insert_vertex(v);
            graph.try_add_edge(u, v);
        }
        graph
    }

    pub fn test_only_from(edges: impl Clone + IntoIterator<Item = impl Into<Edge>>) -> Self {
        let n = edges
            .clone()
            .into_iter()
            .map(|e| e.into())
            .map(|e| e.0.max(e.1) + 1)
            .max()
            .unwrap_or(0);

        Self::from_edges(n as NumNodes, edges)
    }

    /// Nodes adjacent to both `u` and `v` in ascending order
    pub fn common_neighbors(&self, u: Node, v: Node) -> Vec<Node> {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return Vec::new();
        }

        let (small, large) = if self.degree_of(u) <= self.degree_of(v) {
            (u, v)
        } else {
            (v, u)
        };

        let large_neighbors: fxhash::FxHashSet<Node> =
            self.neighbors_of(large).iter().copied().collect();

        let mut common: Vec<Node> = self
            .neighbors_of(small)
            .iter()
            .copied()
            .filter(|&w| w != u && w != v && large_neighbors.contains(&w))
            .collect();
        common.sort_unstable();
        common
    }

    fn insert_vertex(&mut self, u: Node) {
        let idx = u as usize;
        if idx >= self.adj.len() {
            self.adj.resize(idx + 1, Default::default());
            self.present.resize(idx + 1, false);
        }

        if !self.present[idx] {
            self.present[idx] = true;
            self.number_of_nodes += 1;
        }
    }
}

impl InvariantCheck<GraphError> for AdjArray {
    fn is_correct(&self) -> Result<(), GraphError> {
        let mut half_edges: NumEdges = 0;
        let mut nodes: NumNodes = 0;

        for u in self.vertices_range() {
            if !self.has_vertex(u) {
                if let Some(&v) = self.adj[u as usize].first() {
                    return Err(GraphError::DanglingEdge(u, v));
                }
                continue;
            }

            nodes += 1;
            for &v in self.neighbors_of(u) {
                if u == v {
                    return Err(GraphError::SelfLoop(u));
                }

                if !self.has_vertex(v) {
                    return Err(GraphError::DanglingEdge(u, v));
                }

                if !self.adj[v as usize].contains(&u) {
                    return Err(GraphError::Asymmetric(u, v));
                }

                half_edges += 1;
            }
        }

        if nodes != self.number_of_nodes {
            return Err(GraphError::NodeCount {
                stored: self.number_of_nodes,
                counted: nodes,
            });
        }

        if half_edges != 2 * self.number_of_edges {
            return Err(GraphError::EdgeCount {
                stored: self.number_of_edges,
                counted: half_edges / 2,
            });
        }

        Ok(())
    }
}

impl fmt::Debug for AdjArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjArray")
            .field("nodes", &self.vertices().collect::<Vec<_>>())
            .field("edges", &self.ordered_edges())
            .finish()
    }
}

super::graph_tests::impl_graph_tests!(AdjArray);

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn sparse_labels() {
        let graph = AdjArray::from_sparse_edges([42], [(3, 7), (7, 11)]);

        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.vertices().collect_vec(), [3, 7, 11, 42]);
        assert!(!graph.has_vertex(4));
        assert!(!graph.has_vertex(1000));
        assert_eq!(graph.degree_of(7), 2);
        assert_eq!(graph.isolated_vertices().collect_vec(), [42]);
        assert!(graph.is_correct().is_ok());
    }

    #[test]
    fn parallel_edges_collapse() {
        let graph = AdjArray::from_edges(3, [(0, 1), (1, 0), (1, 2), (0, 1)]);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.ordered_edges(), [Edge(0, 1), Edge(1, 2)]);
    }

    #[test]
    fn removal_is_tolerant() {
        let mut graph = AdjArray::test_only_from([(0, 1), (1, 2), (2, 3)]);

        assert!(graph.try_remove_node(1));
        assert!(!graph.try_remove_node(1));
        assert!(!graph.try_remove_node(17));
        assert!(!graph.try_remove_edge(0, 1));
        assert!(!graph.try_remove_edge(5, 9));

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.remove_nodes([1, 2, 2, 9]), 1);
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.vertices().collect_vec(), [0, 3]);
        assert!(graph.is_correct().is_ok());
    }

    #[test]
    fn common_neighbors() {
        // 4-cycle 0-1-2-3-0 with chord 0-2
        let graph = AdjArray::test_only_from([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);

        assert_eq!(graph.common_neighbors(0, 2), [1, 3]);
        assert_eq!(graph.common_neighbors(0, 1), [2]);
        assert_eq!(graph.common_neighbors(1, 3), [0, 2]);
        assert!(graph.common_neighbors(0, 7).is_empty());
    }

    #[test]
    fn invariant_check_detects_loops() {
        let mut graph = AdjArray::new(2);
        graph.add_edge(0, 1);
        assert!(graph.is_correct().is_ok());

        graph.add_edge(1, 1);
        assert_eq!(graph.is_correct(), Err(GraphError::SelfLoop(1)));
    }
}
