use super::*;
use crate::errors::QiroError;
use log::{debug, trace};

/// The entry that terminated a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedEntry {
    pub entry: CorrelationEntry,
    /// Position of `entry` in the ranking; `0` if the strongest entry applied
    pub rank: usize,
}

/// Applies the strongest applicable correlation entry.
///
/// Entries are ranked by descending absolute score. Equal magnitudes keep the order in which
/// the oracle enumerated them. The first entry whose rule reports [`RuleOutcome::Applied`]
/// ends the round.
#[derive(Debug, Clone, Default)]
pub struct Simplifier<R> {
    rules: R,
}

impl<R: SimplificationRule> Simplifier<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Indices into `entries` from strongest to weakest
    pub fn rank(entries: &[CorrelationEntry]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        // sort_by is stable
        order.sort_by(|&a, &b| entries[b].magnitude().total_cmp(&entries[a].magnitude()));
        order
    }

    /// Applies the first applicable entry in ranked order to `problem` and `solution`.
    ///
    /// Entries referring to nodes or edges that are no longer present are skipped.
    /// Fails with [`QiroError::NoApplicableRule`] if no entry applies.
    pub fn simplify(
        &self,
        problem: &mut Problem,
        solution: &mut Solution,
        entries: &[CorrelationEntry],
    ) -> Result<AppliedEntry, QiroError> {
        for (rank, idx) in Self::rank(entries).into_iter().enumerate() {
            let entry = &entries[idx];
            let (u, v) = entry.pair;

            let present = if entry.is_one_point() {
                problem.has_node(u)
            } else {
                problem.has_edge(u, v)
            };

            if !present {
                trace!("{} skips stale entry {entry}", R::NAME);
                continue;
            }

            match self.rules.apply(entry, problem, solution) {
                RuleOutcome::Applied => {
                    debug!("{} applied {entry} at rank {rank}", R::NAME);
                    return Ok(AppliedEntry {
                        entry: *entry,
                        rank,
                    });
                }
                RuleOutcome::NotApplicable => {
                    trace!("{} not applicable to {entry}", R::NAME);
                }
            }
        }

        Err(QiroError::NoApplicableRule {
            entries: entries.len(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{correlation::canonical_entries, graph::Edge, problem::ProblemKind};

    fn cycle4() -> Problem {
        Problem::from_edges(
            ProblemKind::MaxIndependentSet,
            4,
            [(0, 1), (1, 2), (2, 3), (3, 0)],
        )
        .unwrap()
    }

    #[test]
    fn rank_is_stable_by_magnitude() {
        let entries = [
            CorrelationEntry::one_point(0, 0.2),
            CorrelationEntry::one_point(1, -0.7),
            CorrelationEntry::two_points(0, 1, 0.7),
            CorrelationEntry::one_point(2, -0.2),
            CorrelationEntry::two_points(1, 2, 0.0),
        ];

        assert_eq!(Simplifier::<RuleSet>::rank(&entries), [1, 2, 0, 3, 4]);
    }

    #[test]
    fn cycle_falls_back_to_one_point() {
        let mut problem = cycle4();
        let mut solution = Solution::new();
        let entries = canonical_entries(&problem, |_| Ok(0.1), |_| Ok(-0.5)).unwrap();

        let applied = Simplifier::new(IndependentSetRules::new())
            .simplify(&mut problem, &mut solution, &entries)
            .unwrap();

        // all four edges lack common neighbors; node 0 comes first among the one-point entries
        assert_eq!(applied.rank, 4);
        assert_eq!(applied.entry, CorrelationEntry::one_point(0, 0.1));
        assert!(solution.is_empty());
        assert_eq!(problem.nodes().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(problem.edges(), [Edge(1, 2), Edge(2, 3)]);
    }

    #[test]
    fn fallback_applies_only_second_entry() {
        // triangle 0-1-2 with pendant 3 at 2
        let mut problem =
            Problem::from_edges(ProblemKind::MaxIndependentSet, 4, [(0, 1), (1, 2), (0, 2), (2, 3)])
                .unwrap();
        let mut solution = Solution::new();

        let entries = [
            CorrelationEntry::two_points(2, 3, -0.9), // no common neighbor
            CorrelationEntry::two_points(0, 1, -0.8), // common neighbor 2
            CorrelationEntry::one_point(3, -0.1),
        ];

        let applied = Simplifier::new(IndependentSetRules::new())
            .simplify(&mut problem, &mut solution, &entries)
            .unwrap();

        assert_eq!(applied.rank, 1);
        assert_eq!(applied.entry.pair, (0, 1));
        assert_eq!(problem.edges(), [Edge(0, 1)]);
        assert_eq!(solution.sorted(), [3]);
    }

    #[test]
    fn equal_magnitudes_follow_enumeration_order() {
        for reversed in [false, true] {
            let mut problem =
                Problem::from_edges(ProblemKind::MinVertexCover, 3, [(0, 1), (1, 2)]).unwrap();
            let mut solution = Solution::new();

            let mut entries = vec![
                CorrelationEntry::one_point(0, -0.5),
                CorrelationEntry::one_point(2, 0.5),
            ];
            if reversed {
                entries.reverse();
            }

            let applied = Simplifier::new(VertexCoverRules::new())
                .simplify(&mut problem, &mut solution, &entries)
                .unwrap();

            assert_eq!(applied.rank, 0);
            assert_eq!(applied.entry, entries[0]);
        }
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut problem = cycle4();
        let mut solution = Solution::new();
        let entries: Vec<_> = problem
            .edges()
            .into_iter()
            .map(|Edge(u, v)| CorrelationEntry::two_points(u, v, -0.5))
            .collect();

        let result = Simplifier::new(IndependentSetRules::new()).simplify(
            &mut problem,
            &mut solution,
            &entries,
        );

        assert_eq!(result, Err(QiroError::NoApplicableRule { entries: 4 }));
        assert_eq!(problem.number_of_edges(), 4);
        assert!(solution.is_empty());
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut problem =
            Problem::from_edges(ProblemKind::MinVertexCover, 3, [(0, 1), (1, 2)]).unwrap();
        let mut solution = Solution::new();

        let entries = [
            CorrelationEntry::one_point(9, -1.0),
            CorrelationEntry::two_points(0, 2, 1.0),
            CorrelationEntry::one_point(1, -0.5),
        ];

        let applied = Simplifier::new(VertexCoverRules::new())
            .simplify(&mut problem, &mut solution, &entries)
            .unwrap();

        assert_eq!(applied.rank, 2);
        assert_eq!(solution.sorted(), [1]);
        assert_eq!(problem.number_of_edges(), 0);
    }
}
