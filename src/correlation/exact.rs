use super::*;
use crate::problem::RuleFamily;
use fxhash::FxHashMap;
use log::debug;

/// Largest graph [`ExactOracle`] accepts regardless of configuration
pub const EXACT_ORACLE_HARD_LIMIT: NumNodes = 30;

/// Computes correlations of the Boltzmann distribution over all feasible assignments
/// of the current graph.
///
/// Every feasible assignment `x` (a vertex cover, or an independent set) is weighted with
/// `exp(beta * f(x))` where `f(x) = -|x|` for vertex cover and `f(x) = |x|` for independent
/// set. For large `beta` the distribution concentrates on optimal solutions; `beta = 0`
/// yields the uniform distribution over feasible assignments. The running time is
/// `O(2^n (n + m))`, so the oracle refuses graphs with more than `max_nodes` nodes.
#[derive(Clone, Debug)]
pub struct ExactOracle {
    beta: f64,
    max_nodes: NumNodes,
}

impl Default for ExactOracle {
    fn default() -> Self {
        Self {
            beta: 4.0,
            max_nodes: 20,
        }
    }
}

impl ExactOracle {
    pub fn new(beta: f64, max_nodes: NumNodes) -> Result<Self, OracleError> {
        if !beta.is_finite() || beta < 0.0 {
            return Err(OracleError::Configuration(format!(
                "beta must be finite and non-negative, got {beta}"
            )));
        }

        if max_nodes > EXACT_ORACLE_HARD_LIMIT {
            return Err(OracleError::Configuration(format!(
                "max_nodes must not exceed {EXACT_ORACLE_HARD_LIMIT}, got {max_nodes}"
            )));
        }

        Ok(Self { beta, max_nodes })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn max_nodes(&self) -> NumNodes {
        self.max_nodes
    }
}

impl CorrelationOracle for ExactOracle {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        let n = problem.number_of_nodes();
        if n > self.max_nodes {
            return Err(OracleError::TooLarge {
                nodes: n,
                limit: self.max_nodes,
            });
        }

        let nodes: Vec<Node> = problem.nodes().collect();
        let bit_of: FxHashMap<Node, usize> =
            nodes.iter().enumerate().map(|(i, &u)| (u, i)).collect();

        let edges = problem.edges();
        let edge_bits: Vec<(usize, usize)> = edges
            .iter()
            .map(|Edge(u, v)| (bit_of[u], bit_of[v]))
            .collect();

        let family = problem.family();
        let is_feasible = |mask: u64| {
            edge_bits.iter().all(|&(a, b)| {
                let sa = (mask >> a) & 1 == 1;
                let sb = (mask >> b) & 1 == 1;
                match family {
                    RuleFamily::VertexCover => sa || sb,
                    RuleFamily::IndependentSet => !(sa && sb),
                }
            })
        };
        let objective = |mask: u64| {
            let size = mask.count_ones() as f64;
            match family {
                RuleFamily::VertexCover => -size,
                RuleFamily::IndependentSet => size,
            }
        };

        let assignments = 1u64 << nodes.len();

        // first pass: best objective to keep the exponentials in range
        let best = (0..assignments)
            .filter(|&mask| is_feasible(mask))
            .map(&objective)
            .fold(f64::NEG_INFINITY, f64::max);

        if !best.is_finite() {
            return Err(OracleError::Backend(
                "graph admits no feasible assignment".into(),
            ));
        }

        let spin = |mask: u64, bit: usize| if (mask >> bit) & 1 == 1 { -1.0 } else { 1.0 };

        let mut total = 0.0;
        let mut one_point = vec![0.0; nodes.len()];
        let mut two_points = vec![0.0; edge_bits.len()];

        for mask in (0..assignments).filter(|&mask| is_feasible(mask)) {
            let weight = (self.beta * (objective(mask) - best)).exp();
            total += weight;

            for (i, acc) in one_point.iter_mut().enumerate() {
                *acc += weight * spin(mask, i);
            }

            for (&(a, b), acc) in edge_bits.iter().zip(two_points.iter_mut()) {
                *acc += weight * spin(mask, a) * spin(mask, b);
            }
        }

        debug!(
            "ExactOracle: n={}, m={}, best objective {best}, partition sum {total:.4}",
            nodes.len(),
            edges.len()
        );

        canonical_entries(
            problem,
            |u| Ok(one_point[bit_of[&u]] / total),
            |edge| {
                let idx = edges.binary_search(&edge).map_err(|_| {
                    OracleError::Backend(format!("edge {edge} vanished during evaluation"))
                })?;
                Ok(two_points[idx] / total)
            },
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::problem::ProblemKind;

    const EPS: f64 = 1e-9;

    #[test]
    fn single_edge_vertex_cover() {
        // feasible covers of one edge: {0}, {1}, {0, 1}
        let problem = Problem::from_edges(ProblemKind::MinVertexCover, 2, [(0, 1)]).unwrap();
        let oracle = ExactOracle::new(0.0, 10).unwrap();
        let entries = oracle.compute(&problem).unwrap();

        // uniform: P(0 selected) = 2/3 -> <Z_0> = 1/3 - 2/3
        assert!((entries[0].score + 1.0 / 3.0).abs() < EPS);
        assert!((entries[1].score + 1.0 / 3.0).abs() < EPS);
        // <Z_0 Z_1> = (-1 - 1 + 1) / 3
        assert!((entries[2].score + 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn star_concentrates_on_center() {
        let problem =
            Problem::from_edges(ProblemKind::MinVertexCover, 5, [(0, 1), (0, 2), (0, 3), (0, 4)])
                .unwrap();
        let entries = ExactOracle::new(8.0, 10).unwrap().compute(&problem).unwrap();

        assert!(entries[0].score < -0.99);
        assert!(entries[1..5].iter().all(|e| e.score > 0.99));
        assert!(entries[5..].iter().all(|e| e.score < -0.99));
        assert!(validate_entries(&problem, &entries).is_ok());
    }

    #[test]
    fn independent_set_on_path() {
        // unique maximum independent set of the path 0-1-2 is {0, 2}
        let problem =
            Problem::from_edges(ProblemKind::MaxIndependentSet, 3, [(0, 1), (1, 2)]).unwrap();
        let entries = ExactOracle::new(10.0, 10).unwrap().compute(&problem).unwrap();

        assert!(entries[0].score < -0.99);
        assert!(entries[1].score > 0.99);
        assert!(entries[2].score < -0.99);
    }

    #[test]
    fn limits() {
        let problem = Problem::from_edges(ProblemKind::MinVertexCover, 6, [(0, 1)]).unwrap();
        assert_eq!(
            ExactOracle::new(1.0, 5).unwrap().compute(&problem),
            Err(OracleError::TooLarge { nodes: 6, limit: 5 })
        );

        assert!(ExactOracle::new(-1.0, 5).is_err());
        assert!(ExactOracle::new(f64::NAN, 5).is_err());
        assert!(ExactOracle::new(1.0, EXACT_ORACLE_HARD_LIMIT + 1).is_err());
    }
}
