//! The agglomeration engine: turns N singletons into a full merge
//! hierarchy of N-1 merges.
//!
//! Each round enumerates all unordered pairs of live clusters, evaluates
//! the linkage metric for every pair, and merges the strictly minimal one.
//! Ties go to the first pair in enumeration order (lexicographic `(i, j)`
//! over the live set), so two engines fed identical inputs and a
//! deterministic metric produce identical hierarchies.

use crate::core::{Cluster, ClusterId, FraclusError, Result};
use crate::database::VectorDatabase;
use crate::hierarchy::Hierarchy;
use crate::metric::LinkageMetric;
use log::debug;
use rayon::prelude::*;

/// Orchestrates the merge loop over a live set of clusters.
///
/// The engine owns no point data; it consumes a [`VectorDatabase`] and a
/// [`LinkageMetric`] and produces a [`Hierarchy`]. The supporter count is
/// consumed by the metric, not the engine; the engine only enforces the
/// `k >= 2` bound before any round runs.
#[derive(Debug)]
pub struct AgglomerationEngine<M> {
    metric: M,
    supporters: usize,
}

impl<M: LinkageMetric + Sync> AgglomerationEngine<M> {
    /// Create an engine, rejecting `supporters < 2` before any work starts.
    pub fn new(metric: M, supporters: usize) -> Result<Self> {
        if supporters < 2 {
            return Err(FraclusError::InvalidParameter(supporters));
        }
        Ok(Self { metric, supporters })
    }

    pub fn supporters(&self) -> usize {
        self.supporters
    }

    /// Run the full agglomeration without progress reporting.
    pub fn run<'db, D>(&self, database: &'db D) -> Result<Hierarchy<'db, D>>
    where
        D: VectorDatabase + Sync,
    {
        self.run_with_progress(database, |_, _| {})
    }

    /// Run the full agglomeration, invoking `progress` once per completed
    /// round with `(completed, total)`.
    ///
    /// The callback is purely informational; its side effects never
    /// influence the outcome, and the engine does not proceed until it
    /// returns.
    pub fn run_with_progress<'db, D, P>(
        &self,
        database: &'db D,
        mut progress: P,
    ) -> Result<Hierarchy<'db, D>>
    where
        D: VectorDatabase + Sync,
        P: FnMut(usize, usize),
    {
        let ids = database.ids();
        if ids.is_empty() {
            return Err(FraclusError::EmptyDatabase);
        }

        debug!("assigning {} database objects to base clusters", ids.len());
        let mut arena: Vec<Cluster> = ids
            .into_iter()
            .enumerate()
            .map(|(index, point)| Cluster::singleton(ClusterId(index), point))
            .collect();
        let mut live: Vec<ClusterId> = arena.iter().map(Cluster::id).collect();

        let total_rounds = arena.len() - 1;
        debug!("agglomerating over {total_rounds} rounds");
        for round in 1..=total_rounds {
            let (i, j, cost) = self
                .best_pair(&arena, &live, database)
                .ok_or(FraclusError::DegenerateMetric { round })?;

            let merged_id = ClusterId(arena.len());
            let (first, second) = (live[i], live[j]);
            let merged = Cluster::merge(merged_id, round, &arena[first.0], &arena[second.0], cost);

            // Children leave the live set in selection order; higher index
            // removed first so the lower one stays valid.
            live.remove(j);
            live.remove(i);
            live.push(merged_id);

            arena[first.0].add_parent(merged_id);
            arena[second.0].add_parent(merged_id);
            arena.push(merged);

            progress(round, total_rounds);
        }

        let root = live[0];
        Ok(Hierarchy::new(arena, root, database))
    }

    /// Scan all unordered live pairs and return the minimal finite cost
    /// with its pair indices, or `None` when every cost is non-finite.
    ///
    /// Pair costs are evaluated in parallel; the reduction re-applies the
    /// documented tie-break (smallest `(i, j)` wins on equal cost), so the
    /// selection is identical to a sequential scan in enumeration order.
    fn best_pair<D>(
        &self,
        arena: &[Cluster],
        live: &[ClusterId],
        database: &D,
    ) -> Option<(usize, usize, f64)>
    where
        D: VectorDatabase + Sync,
    {
        let m = live.len();
        let pairs: Vec<(usize, usize)> = (0..m)
            .flat_map(|i| (i + 1..m).map(move |j| (i, j)))
            .collect();
        pairs
            .par_iter()
            .filter_map(|&(i, j)| {
                let cost = self
                    .metric
                    .cost(&arena[live[i].0], &arena[live[j].0], database);
                cost.is_finite().then_some((i, j, cost))
            })
            .reduce_with(|best, candidate| {
                if candidate.2 < best.2
                    || (candidate.2 == best.2 && (candidate.0, candidate.1) < (best.0, best.1))
                {
                    candidate
                } else {
                    best
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryDatabase, PointId};
    use crate::metric::CentroidDistance;

    /// Metric returning NaN whenever either cluster covers the given
    /// point, centroid distance otherwise.
    struct PoisonedMetric {
        poison: PointId,
    }

    impl LinkageMetric for PoisonedMetric {
        fn cost<D: VectorDatabase>(&self, first: &Cluster, second: &Cluster, database: &D) -> f64 {
            if first.members().contains(&self.poison) || second.members().contains(&self.poison) {
                return f64::NAN;
            }
            CentroidDistance.cost(first, second, database)
        }
    }

    struct AlwaysNan;

    impl LinkageMetric for AlwaysNan {
        fn cost<D: VectorDatabase>(&self, _: &Cluster, _: &Cluster, _: &D) -> f64 {
            f64::NAN
        }
    }

    fn line(points: &[f64]) -> InMemoryDatabase {
        InMemoryDatabase::new(points.iter().map(|&x| vec![x]).collect())
    }

    #[test]
    fn rejects_supporter_count_below_two() {
        let err = AgglomerationEngine::new(CentroidDistance, 1).unwrap_err();
        assert!(matches!(err, FraclusError::InvalidParameter(1)));
    }

    #[test]
    fn accepts_supporter_count_of_two() {
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        assert_eq!(engine.supporters(), 2);
    }

    #[test]
    fn empty_database_is_invalid_input() {
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let err = engine.run(&InMemoryDatabase::default()).unwrap_err();
        assert!(matches!(err, FraclusError::EmptyDatabase));
    }

    #[test]
    fn single_point_yields_one_singleton_and_no_merges() {
        let db = line(&[42.0]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let hierarchy = engine.run(&db).unwrap();

        assert_eq!(hierarchy.clusters().len(), 1);
        assert_eq!(hierarchy.merge_count(), 0);
        assert!(hierarchy.root().is_singleton());
        assert_eq!(hierarchy.root().members(), &[PointId(0)]);
    }

    #[test]
    fn five_points_yield_nine_clusters() {
        let db = line(&[0.0, 1.0, 5.0, 9.0, 10.0]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let hierarchy = engine.run(&db).unwrap();

        assert_eq!(hierarchy.clusters().len(), 9);
        assert_eq!(hierarchy.merge_count(), 4);
        assert_eq!(hierarchy.root().members().len(), 5);
    }

    #[test]
    fn equal_costs_break_toward_the_first_pair_enumerated() {
        // Three collinear points: pairs (0,1) and (1,2) both cost 1.
        let db = line(&[0.0, 1.0, 2.0]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let hierarchy = engine.run(&db).unwrap();

        let first_merge = &hierarchy.clusters()[3];
        assert_eq!(first_merge.children(), Some((ClusterId(0), ClusterId(1))));
    }

    #[test]
    fn non_finite_costs_are_never_selected() {
        // Pairs touching point 0 are NaN, so round 1 must merge (1, 2).
        let db = line(&[0.0, 10.0, 11.0]);
        let engine = AgglomerationEngine::new(PoisonedMetric { poison: PointId(0) }, 2).unwrap();
        let err = engine.run(&db).unwrap_err();

        // Round 2 has only the poisoned pair left and must fail.
        assert!(matches!(err, FraclusError::DegenerateMetric { round: 2 }));
    }

    #[test]
    fn all_non_finite_round_fails_with_round_index() {
        let db = line(&[0.0, 1.0]);
        let engine = AgglomerationEngine::new(AlwaysNan, 2).unwrap();
        let err = engine.run(&db).unwrap_err();
        assert!(matches!(err, FraclusError::DegenerateMetric { round: 1 }));
    }

    #[test]
    fn progress_fires_once_per_round() {
        let db = line(&[0.0, 1.0, 5.0, 6.0]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let mut calls = Vec::new();
        engine
            .run_with_progress(&db, |completed, total| calls.push((completed, total)))
            .unwrap();
        assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn merged_children_record_exactly_one_parent() {
        let db = line(&[0.0, 1.0, 5.0, 6.0]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let hierarchy = engine.run(&db).unwrap();

        for cluster in hierarchy.clusters() {
            let expected = usize::from(cluster.id() != hierarchy.root().id());
            assert_eq!(cluster.parents().len(), expected);
        }
    }

    #[test]
    fn identical_runs_produce_identical_hierarchies() {
        let db = InMemoryDatabase::new(vec![
            vec![0.3, 1.2],
            vec![4.1, 0.7],
            vec![2.2, 3.3],
            vec![0.9, 0.1],
            vec![3.0, 2.0],
            vec![1.5, 1.5],
        ]);
        let engine = AgglomerationEngine::new(CentroidDistance, 2).unwrap();
        let first = engine.run(&db).unwrap();
        let second = engine.run(&db).unwrap();

        assert_eq!(first.clusters(), second.clusters());
    }
}
