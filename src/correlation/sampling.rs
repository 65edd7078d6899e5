use super::*;
use crate::problem::RuleFamily;
use fxhash::FxHashMap;
use log::debug;
use rand::{SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;

/// Monte-Carlo estimate of the correlations from randomised greedy solutions.
///
/// Each sample processes the nodes in random order and builds a maximal independent set;
/// for vertex cover the complement of that set is used. Only the best `elite_fraction`
/// of the samples enters the estimate. The random stream is derived from `seed` and the
/// current graph, so repeated calls on the same state return the same entries.
#[derive(Clone, Debug)]
pub struct SamplingOracle {
    samples: usize,
    elite_fraction: f64,
    seed: u64,
}

impl Default for SamplingOracle {
    fn default() -> Self {
        Self {
            samples: 100,
            elite_fraction: 0.25,
            seed: 42,
        }
    }
}

impl SamplingOracle {
    pub fn new(samples: usize, elite_fraction: f64, seed: u64) -> Result<Self, OracleError> {
        if samples == 0 {
            return Err(OracleError::Configuration(
                "at least one sample is required".into(),
            ));
        }

        if !(elite_fraction > 0.0 && elite_fraction <= 1.0) {
            return Err(OracleError::Configuration(format!(
                "elite fraction must lie in (0, 1], got {elite_fraction}"
            )));
        }

        Ok(Self {
            samples,
            elite_fraction,
            seed,
        })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn elite_fraction(&self) -> f64 {
        self.elite_fraction
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn elite_size(&self) -> usize {
        ((self.samples as f64 * self.elite_fraction).ceil() as usize).clamp(1, self.samples)
    }

    fn rng_for(&self, problem: &Problem) -> Pcg64Mcg {
        let state = fxhash::hash64(&(
            self.seed,
            problem.number_of_nodes(),
            problem.number_of_edges(),
            problem.nodes().next(),
        ));
        Pcg64Mcg::seed_from_u64(state)
    }
}

/// Greedy maximal independent set on `nodes` in the given order; `selected` is indexed
/// by position in `nodes`.
fn greedy_independent_set(
    order: &[usize],
    neighbors: &[Vec<usize>],
    selected: &mut [bool],
) {
    selected.iter_mut().for_each(|s| *s = false);

    for &i in order {
        if neighbors[i].iter().all(|&j| !selected[j]) {
            selected[i] = true;
        }
    }
}

impl CorrelationOracle for SamplingOracle {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        let nodes: Vec<Node> = problem.nodes().collect();
        let index_of: FxHashMap<Node, usize> =
            nodes.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let neighbors: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&u| problem.neighbors(u).iter().map(|v| index_of[v]).collect())
            .collect();

        let family = problem.family();
        let mut rng = self.rng_for(problem);
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        let mut selected = vec![false; nodes.len()];

        // (objective, assignment) with larger objective being better
        let mut pool: Vec<(i64, Vec<bool>)> = Vec::with_capacity(self.samples);
        for _ in 0..self.samples {
            order.shuffle(&mut rng);
            greedy_independent_set(&order, &neighbors, &mut selected);

            if family == RuleFamily::VertexCover {
                selected.iter_mut().for_each(|s| *s = !*s);
            }

            let size = selected.iter().filter(|&&s| s).count() as i64;
            let objective = match family {
                RuleFamily::VertexCover => -size,
                RuleFamily::IndependentSet => size,
            };
            pool.push((objective, selected.clone()));
        }

        // stable: ties keep sampling order
        pool.sort_by(|a, b| b.0.cmp(&a.0));
        pool.truncate(self.elite_size());

        debug!(
            "SamplingOracle: n={}, {} of {} samples kept, best objective {:?}",
            nodes.len(),
            pool.len(),
            self.samples,
            pool.first().map(|(o, _)| *o)
        );

        let spin = |assignment: &[bool], i: usize| if assignment[i] { -1.0 } else { 1.0 };
        let elite = pool.len() as f64;

        canonical_entries(
            problem,
            |u| {
                let i = index_of[&u];
                Ok(pool.iter().map(|(_, a)| spin(a, i)).sum::<f64>() / elite)
            },
            |Edge(u, v)| {
                let (i, j) = (index_of[&u], index_of[&v]);
                Ok(pool
                    .iter()
                    .map(|(_, a)| spin(a, i) * spin(a, j))
                    .sum::<f64>()
                    / elite)
            },
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::problem::ProblemKind;
    use rand::Rng;
    use rand_pcg::Pcg64;

    #[test]
    fn configuration() {
        assert!(SamplingOracle::new(0, 0.5, 1).is_err());
        assert!(SamplingOracle::new(10, 0.0, 1).is_err());
        assert!(SamplingOracle::new(10, 1.5, 1).is_err());
        assert!(SamplingOracle::new(10, f64::NAN, 1).is_err());
        assert_eq!(SamplingOracle::new(10, 0.25, 1).unwrap().elite_size(), 3);
        assert_eq!(SamplingOracle::new(3, 0.01, 1).unwrap().elite_size(), 1);

        let oracle = SamplingOracle::new(16, 0.5, 9).unwrap();
        assert_eq!(
            (oracle.samples(), oracle.elite_fraction(), oracle.seed()),
            (16, 0.5, 9)
        );
    }

    #[test]
    fn deterministic_and_complete() {
        let mut rng = Pcg64::seed_from_u64(0xbeef);

        for kind in [ProblemKind::MinVertexCover, ProblemKind::MaxIndependentSet] {
            for _ in 0..20 {
                let n = rng.gen_range(2..25);
                let graph = AdjArray::random_gnp(&mut rng, n, 0.3);
                let problem = Problem::new(kind, graph).unwrap();

                let oracle = SamplingOracle::new(40, 0.5, 7).unwrap();
                let first = oracle.compute(&problem).unwrap();
                let second = oracle.compute(&problem).unwrap();

                assert_eq!(first, second);
                assert!(validate_entries(&problem, &first).is_ok());
                assert!(first.iter().all(|e| (-1.0..=1.0).contains(&e.score)));
            }
        }
    }

    #[test]
    fn star_center() {
        // a greedy maximal independent set of a star is either the center or all leaves;
        // the elite keeps the better one
        let edges = (1..8).map(|v| (0, v));
        let mis = Problem::from_edges(ProblemKind::MaxIndependentSet, 8, edges.clone()).unwrap();
        let entries = SamplingOracle::new(50, 0.2, 3).unwrap().compute(&mis).unwrap();
        assert_eq!(entries[0].score, 1.0);
        assert!(entries[1..8].iter().all(|e| e.score == -1.0));

        let vc = Problem::from_edges(ProblemKind::MinVertexCover, 8, edges).unwrap();
        let entries = SamplingOracle::new(50, 0.2, 3).unwrap().compute(&vc).unwrap();
        assert_eq!(entries[0].score, -1.0);
        assert!(entries[1..8].iter().all(|e| e.score == 1.0));
    }
}
