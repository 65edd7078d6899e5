use super::*;
use std::collections::VecDeque;

pub trait Connectivity {
    /// Returns the connected components; each component is sorted and the components
    /// are ordered by their smallest node.
    fn connected_components(&self) -> Vec<Vec<Node>>;

    /// Returns true if the graph has at most one connected component
    fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }
}

impl<G> Connectivity for G
where
    G: AdjacencyList,
{
    fn connected_components(&self) -> Vec<Vec<Node>> {
        let mut visited = vec![false; self.vertices_range().len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in self.vertices() {
            if visited[start as usize] {
                continue;
            }

            visited[start as usize] = true;
            queue.push_back(start);
            let mut component = Vec::new();

            while let Some(u) = queue.pop_front() {
                component.push(u);
                for &v in self.neighbors_of(u) {
                    if !visited[v as usize] {
                        visited[v as usize] = true;
                        queue.push_back(v);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }
}
