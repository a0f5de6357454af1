//! K-medians clustering using Lloyd-style bulk iterations.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::debug;

use super::init::Initializer;
use super::{Cluster, Clustering};
use crate::datastore::stores::{ScalarStore, StoreHints};
use crate::distance::metric::DistanceFunction;
use crate::distance::value::{DistanceValue, DoubleDistance};
use crate::relation::Relation;
use crate::utils::errors::CoreError;
use crate::utils::types::Vector;

/// Lloyd-style k-medians: alternate nearest-representative assignment with
/// column-wise median updates until an assignment pass changes nothing or
/// the iteration cap is reached. A non-positive cap means run to
/// convergence. Local-optimum heuristic; seeding strategies live in the
/// [`Initializer`].
pub struct KMediansLloyd<F: DistanceFunction<DoubleDistance>> {
    k: usize,
    max_iter: i32,
    func: F,
}

impl<F: DistanceFunction<DoubleDistance>> KMediansLloyd<F> {
    pub fn new(k: usize, max_iter: i32, func: F) -> Result<Self, CoreError> {
        if k == 0 {
            return Err(CoreError::ContractViolation("k must be positive".into()));
        }
        Ok(Self { k, max_iter, func })
    }

    /// Runs the algorithm over `relation`. An empty dataset yields an empty
    /// clustering with zero clusters, without running any iteration.
    pub fn run(
        &self,
        relation: &Relation,
        initializer: &dyn Initializer,
    ) -> Result<Clustering, CoreError> {
        if relation.is_empty() {
            return Ok(Clustering::default());
        }

        let mut medians = initializer.initial_representatives(relation, self.k)?;
        if medians.len() != self.k {
            return Err(CoreError::ContractViolation(format!(
                "initializer produced {} representatives, expected {}",
                medians.len(),
                self.k
            )));
        }
        for median in &medians {
            if median.len() != relation.dim() {
                return Err(CoreError::DimensionMismatch {
                    expected: relation.dim(),
                    actual: median.len(),
                });
            }
        }

        let mut assignment: ScalarStore<i32> = ScalarStore::new(
            relation.len(),
            StoreHints::TEMP | StoreHints::HOT,
            -1, // unassigned
        );
        // Member rows per cluster, rebuilt every Assign pass.
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); self.k];

        let mut iteration = 0;
        loop {
            if self.max_iter > 0 && iteration >= self.max_iter {
                break;
            }
            iteration += 1;
            let changed = self.assign(relation, &medians, &mut members, &mut assignment);
            debug!(iteration, changed, "assignment pass complete");
            // Stop if no cluster assignment changed.
            if !changed {
                break;
            }
            self.update_medians(relation, &members, &mut medians);
        }
        debug!(iterations = iteration, k = self.k, "k-medians finished");

        let clusters = members
            .into_iter()
            .zip(medians)
            .map(|(rows, representative)| Cluster {
                members: rows
                    .into_iter()
                    .map(|row| relation.oid_at(row))
                    .collect::<BTreeSet<_>>(),
                representative,
            })
            .collect();
        Ok(Clustering { clusters })
    }

    /// One Assign pass. The per-object nearest-representative computation is
    /// independent and runs across the rayon pool; the assignment store and
    /// member sets are written from the calling thread only, and the changed
    /// flag is OR-combined so no update is lost.
    fn assign(
        &self,
        relation: &Relation,
        medians: &[Vector],
        members: &mut [Vec<usize>],
        assignment: &mut ScalarStore<i32>,
    ) -> bool {
        let computed: Vec<(usize, bool)> = (0..relation.len())
            .into_par_iter()
            .map(|row| {
                let vec = relation.vector_at(row);
                let mut best = 0usize;
                let mut best_d = self.func.distance(vec, &medians[0]);
                for (i, median) in medians.iter().enumerate().skip(1) {
                    let d = self.func.distance(vec, median);
                    // Strict comparison keeps the lowest index on ties.
                    if d.cmp_asc(&best_d) == Ordering::Less {
                        best = i;
                        best_d = d;
                    }
                }
                let changed = assignment.get(relation.oid_at(row)) != best as i32;
                (best, changed)
            })
            .collect();

        let changed = computed.iter().any(|&(_, c)| c);
        for rows in members.iter_mut() {
            rows.clear();
        }
        for (row, &(best, _)) in computed.iter().enumerate() {
            members[best].push(row);
            assignment.put(relation.oid_at(row), best as i32);
        }
        changed
    }

    /// Recomputes each representative as the column-wise median of its
    /// current members. A cluster that became empty keeps its previous
    /// representative unchanged.
    fn update_medians(&self, relation: &Relation, members: &[Vec<usize>], medians: &mut [Vector]) {
        let mut column: Vec<OrderedFloat<f64>> = Vec::with_capacity(relation.len());
        for (i, rows) in members.iter().enumerate() {
            if rows.is_empty() {
                continue;
            }
            for d in 0..relation.dim() {
                column.clear();
                column.extend(rows.iter().map(|&row| OrderedFloat(relation.vector_at(row)[d])));
                column.sort_unstable();
                let mid = column.len() / 2;
                medians[i][d] = if column.len() % 2 == 1 {
                    column[mid].0
                } else {
                    (column[mid - 1].0 + column[mid].0) / 2.0
                };
            }
        }
    }
}
