use crate::graph::*;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_distr::Geometric;
use rand_pcg::Pcg64;

pub trait GnpGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Reyni) graph
    /// The `G(n,p)` contains n nodes and each of the `n(n-1)/2` edges exists
    /// independently with probability `p`.
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self;
}

impl<G> GnpGenerator for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self {
        let mut result = Self::new(n);

        // indirection via vector as we need a &mut for rng
        let edges: Vec<_> = BernoulliSamplingRange::new(rng, 0, (n as i64) * (n as i64), p)
            .filter_map(|x| {
                let u = x / (n as i64);
                let v = x % (n as i64);
                (u < v).then_some((u as Node, v as Node))
            })
            .collect();

        for (u, v) in edges {
            result.add_edge(u, v);
        }

        result
    }
}

/// Draws `G(n,p)` graphs seeded with `seed`, `seed + 1`, ... until a connected one is
/// found. Returns the graph and the seed that produced it, or `None` if `max_trials`
/// graphs were all disconnected.
pub fn connected_gnp(n: Node, p: f64, seed: u64, max_trials: u64) -> Option<(AdjArray, u64)> {
    for trial in 0..max_trials {
        let effective_seed = seed.wrapping_add(trial);
        let mut rng = Pcg64::seed_from_u64(effective_seed);
        let graph = AdjArray::random_gnp(&mut rng, n, p);

        if graph.is_connected() {
            return Some((graph, effective_seed));
        }
    }

    debug!("no connected G({n}, {p}) within {max_trials} trials starting at seed {seed}");
    None
}

/// Provides an iterator similarly to Range, but
/// includes each element i.i.d. with probability of p
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Option<Geometric>,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    pub fn new(rng: &'a mut R, begin: i64, end: i64, prob: f64) -> Self {
        debug_assert!(begin <= end);
        debug_assert!((0.0..=1.0).contains(&prob));
        Self {
            rng,
            current: begin - 1,
            end,
            // p = 0 never yields an element
            distr: (prob > 0.0).then(|| Geometric::new(prob)).and_then(Result::ok),
        }
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }

        let Some(distr) = self.distr.as_ref() else {
            self.current = self.end;
            return;
        };

        let skip = self.rng.sample(distr);
        if skip > i64::MAX as u64 {
            self.current = self.end;
        } else {
            self.current += 1;
            self.current = match self.current.checked_add(skip as i64) {
                Some(x) => x,
                None => self.end,
            }
        }
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;
    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();

        if self.current >= self.end {
            None
        } else {
            Some(self.current)
        }
    }
}
