#[macro_export]
macro_rules! impl_graph_tests {
    ($graph : ty) => {
        #[cfg(test)]
        mod graph_tests {
            use itertools::Itertools;

            use super::*;

            #[test]
            fn new() {
                for n in 1..50 {
                    let graph = <$graph>::new(n);

                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.number_of_nodes(), n);

                    assert_eq!(graph.vertices_range().len(), n as usize);
                    assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                }
            }

            #[test]
            fn delete_edges_at_node() {
                let mut graph = <$graph>::new(4);
                graph.add_edges([(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);

                assert_eq!(graph.number_of_edges(), 5);
                assert_eq!(graph.degrees().collect_vec(), [3, 2, 3, 2]);

                assert_eq!(graph.remove_edges_at_node(1), 2);

                assert_eq!(graph.number_of_edges(), 3);
                assert_eq!(graph.degrees().collect_vec(), [2, 0, 2, 2]);
                assert!(graph.has_vertex(1));
            }

            #[test]
            fn remove_nodes() {
                let mut graph = <$graph>::new(5);
                graph.add_edges([(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);

                assert!(graph.try_remove_node(2));
                assert_eq!(graph.number_of_nodes(), 4);
                assert_eq!(graph.number_of_edges(), 3);
                assert_eq!(graph.vertices().collect_vec(), [0, 1, 3, 4]);
                assert!(!graph.has_edge(1, 2));

                assert_eq!(graph.remove_nodes([0, 2, 4]), 2);
                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.vertices().collect_vec(), [1, 3]);
            }

            #[test]
            fn edges() {
                let mut graph = <$graph>::new(4);
                graph.add_edges([(2, 0), (1, 3), (0, 1)]);

                assert_eq!(graph.edges(true).count(), 3);
                assert_eq!(graph.edges(false).count(), 6);
                assert_eq!(graph.ordered_edges(), [Edge(0, 1), Edge(0, 2), Edge(1, 3)]);
                assert!(graph.has_edge(0, 2) && graph.has_edge(2, 0));
            }

            #[test]
            fn loops() {
                let mut graph = <$graph>::new(1);

                assert!(graph.try_add_edge(0, 0));
                assert!(!graph.try_add_edge(0, 0));
                assert!(graph.try_remove_edge(0, 0));
                assert!(!graph.try_remove_edge(0, 0));
            }
        }
    };
}

pub use impl_graph_tests;
