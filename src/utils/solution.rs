use crate::graph::*;
use fxhash::FxHashSet;
use serde::Serialize;
use std::io::Write;

/// Node set accumulated during a solve. Nodes are only ever added; the insertion order
/// is kept for reporting.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Solution {
    set: Vec<Node>,
    #[serde(skip)]
    members: FxHashSet<Node>,
}

impl Solution {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a node to the solution. Returns false if it was already contained.
    ///
    /// # Example
    /// ```
    /// use qiro::utils::Solution;
    /// let mut solution = Solution::new();
    /// assert!(solution.add_node(3));
    /// assert!(!solution.add_node(3));
    /// ```
    pub fn add_node(&mut self, node: Node) -> bool {
        if !self.members.insert(node) {
            return false;
        }
        self.set.push(node);
        true
    }

    /// Adds multiple nodes and returns the number of nodes that were new.
    ///
    /// # Example
    /// ```
    /// use qiro::utils::Solution;
    /// let mut solution = Solution::new();
    /// assert_eq!(solution.add_nodes([0, 1, 2, 1]), 3);
    /// assert_eq!(solution.len(), 3);
    /// ```
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> usize {
        nodes.into_iter().filter(|&u| self.add_node(u)).count()
    }

    pub fn contains(&self, node: Node) -> bool {
        self.members.contains(&node)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.set.iter().copied()
    }

    /// Nodes in ascending order
    pub fn sorted(&self) -> Vec<Node> {
        let mut nodes = self.set.clone();
        nodes.sort_unstable();
        nodes
    }

    /// Writes the solution size followed by one node per line using 1-based indexing,
    /// the convention of the PACE graph format.
    ///
    /// ```
    /// use qiro::utils::Solution;
    /// let mut solution = Solution::new();
    /// solution.add_node(4);
    /// solution.add_node(2);
    ///
    /// let mut buffer: Vec<u8> = Vec::new(); // implements Write
    /// solution.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"2\n3\n5\n");
    /// ```
    pub fn write<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(&mut writer, "{}", self.set.len())?;
        for u in self.sorted() {
            writeln!(&mut writer, "{}", u + 1)?;
        }
        Ok(())
    }

    /// Edges of `graph` with neither endpoint in the solution
    pub fn uncovered_edges(&self, graph: &impl AdjacencyList) -> Vec<Edge> {
        graph
            .edges(true)
            .filter(|&Edge(u, v)| !self.contains(u) && !self.contains(v))
            .collect()
    }

    /// Returns true if every edge of `graph` has an endpoint in the solution
    pub fn is_vertex_cover(&self, graph: &impl AdjacencyList) -> bool {
        self.uncovered_edges(graph).is_empty()
    }

    /// Edges of `graph` with both endpoints in the solution
    pub fn violating_edges(&self, graph: &impl AdjacencyList) -> Vec<Edge> {
        graph
            .edges(true)
            .filter(|&Edge(u, v)| self.contains(u) && self.contains(v))
            .collect()
    }

    /// Returns true if no edge of `graph` has both endpoints in the solution
    pub fn is_independent_set(&self, graph: &impl AdjacencyList) -> bool {
        self.violating_edges(graph).is_empty()
    }

    /// Returns true if the solution nodes are pairwise adjacent in `graph`
    pub fn is_clique(&self, graph: &(impl AdjacencyList + AdjacencyTest)) -> bool {
        let nodes = self.sorted();
        nodes.iter().enumerate().all(|(i, &u)| {
            graph.has_vertex(u) && nodes[i + 1..].iter().all(|&v| graph.has_edge(u, v))
        })
    }
}

impl FromIterator<Node> for Solution {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut solution = Solution::new();
        solution.add_nodes(iter);
        solution
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn path() -> AdjArray {
        AdjArray::test_only_from([(0, 1), (1, 2), (2, 3)])
    }

    #[test]
    fn vertex_cover_checks() {
        let graph = path();

        let cover: Solution = [1, 2].into_iter().collect();
        assert!(cover.is_vertex_cover(&graph));

        let partial: Solution = [1].into_iter().collect();
        assert!(!partial.is_vertex_cover(&graph));
        assert_eq!(partial.uncovered_edges(&graph), [Edge(2, 3)]);
    }

    #[test]
    fn independent_set_checks() {
        let graph = path();

        let independent: Solution = [0, 2].into_iter().collect();
        assert!(independent.is_independent_set(&graph));

        let conflicting: Solution = [0, 1, 3].into_iter().collect();
        assert!(!conflicting.is_independent_set(&graph));
        assert_eq!(conflicting.violating_edges(&graph), [Edge(0, 1)]);
    }

    #[test]
    fn clique_checks() {
        let graph = AdjArray::test_only_from([(0, 1), (1, 2), (0, 2), (2, 3)]);

        assert!([0, 1, 2].into_iter().collect::<Solution>().is_clique(&graph));
        assert!(![1, 2, 3].into_iter().collect::<Solution>().is_clique(&graph));
        assert!(Solution::new().is_clique(&graph));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut solution = Solution::new();
        solution.add_nodes([5, 1, 5, 3]);

        assert_eq!(solution.iter().collect::<Vec<_>>(), [5, 1, 3]);
        assert_eq!(solution.sorted(), [1, 3, 5]);
        assert!(solution.contains(3));
        assert!(!solution.contains(2));
    }
}
