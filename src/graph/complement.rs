use super::*;

pub trait Complement {
    /// Produces a graph on the same labels in which two distinct nodes are adjacent
    /// iff they are not adjacent in `self`.
    fn complement_graph(&self) -> AdjArray;
}

impl<G> Complement for G
where
    G: AdjacencyList + AdjacencyTest,
{
    fn complement_graph(&self) -> AdjArray {
        let nodes: Vec<Node> = self.vertices().collect();
        let mut complement = AdjArray::with_vertices(nodes.iter().copied());

        for (i, &u) in nodes.iter().enumerate() {
            for &v in &nodes[i + 1..] {
                if !self.has_edge(u, v) {
                    complement.add_edge(u, v);
                }
            }
        }

        complement
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn complement() {
        let mut rng = Pcg64::seed_from_u64(0x263741);

        for n in 0..30 {
            let graph = AdjArray::random_gnp(&mut rng, n, 0.5);
            let complement = graph.complement_graph();

            let pairs = (n as NumEdges) * (n as NumEdges).saturating_sub(1) / 2;
            assert_eq!(graph.number_of_edges() + complement.number_of_edges(), pairs);

            assert!(graph
                .edges(true)
                .all(|Edge(u, v)| !complement.has_edge(u, v)));
            assert!(complement
                .edges(true)
                .all(|Edge(u, v)| !graph.has_edge(u, v)));
        }
    }

    #[test]
    fn complement_keeps_sparse_labels() {
        let graph = AdjArray::from_sparse_edges([], [(2, 5), (5, 9)]);
        let complement = graph.complement_graph();

        assert_eq!(complement.ordered_edges(), [Edge(2, 9)]);
        assert!(!complement.has_vertex(0));
    }
}
