//! Exact pruning backend built on one pivot object.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use itertools::Itertools;

use super::{
    Capabilities, HeapEntry, Neighbor, NeighborList, SimilarityIndex, check_dim, check_k,
    check_radius, rank,
};
use crate::distance::metric::DistanceFunction;
use crate::distance::value::{DistanceValue, DoubleDistance};
use crate::relation::Relation;
use crate::utils::errors::CoreError;

/// Pivot-pruning backend: distances from every object to one fixed pivot are
/// precomputed at attach time; at query time the triangle inequality
/// `|d(p, pivot) - d(q, pivot)| <= d(p, q)` discards candidates that cannot
/// enter the result without computing their real distance.
///
/// Exact for any proper metric; attachment with a non-metric distance
/// function is rejected.
#[derive(Debug)]
pub struct PivotPruneIndex<'a, F: DistanceFunction<DoubleDistance>> {
    relation: &'a Relation,
    func: F,
    pivot: Vec<f64>,
    // Pivot distances aligned with the relation's row order.
    pivot_dists: Vec<f64>,
}

impl<'a, F: DistanceFunction<DoubleDistance>> PivotPruneIndex<'a, F> {
    pub const NAME: &'static str = "pivot-prune";

    pub fn capabilities() -> Capabilities {
        Capabilities::all()
    }

    /// Attaches the backend, precomputing all pivot distances. The first
    /// object in OID order serves as the pivot.
    pub fn attach(
        relation: &'a Relation,
        func: F,
        requested: Capabilities,
    ) -> Result<Self, CoreError> {
        let missing = requested.difference(Self::capabilities());
        if !missing.is_empty() {
            return Err(CoreError::CapabilityMismatch {
                backend: Self::NAME,
                missing: format!("{missing:?}"),
            });
        }
        if !func.is_metric() {
            return Err(CoreError::CapabilityMismatch {
                backend: Self::NAME,
                missing: "a metric distance function".into(),
            });
        }

        let pivot = if relation.is_empty() {
            vec![0.0; relation.dim()]
        } else {
            relation.vector_at(0).to_vec()
        };
        let pivot_dists = relation
            .iter()
            .map(|(_, vec)| func.distance(&pivot, vec).0)
            .collect();
        Ok(Self {
            relation,
            func,
            pivot,
            pivot_dists,
        })
    }
}

impl<'a, F: DistanceFunction<DoubleDistance>> SimilarityIndex<DoubleDistance>
    for PivotPruneIndex<'a, F>
{
    fn relation(&self) -> &Relation {
        self.relation
    }

    fn distance(&self, a: &[f64], b: &[f64]) -> DoubleDistance {
        self.func.distance(a, b)
    }

    fn knn(&self, query: &[f64], k: usize) -> Result<NeighborList<DoubleDistance>, CoreError> {
        check_k(k)?;
        check_dim(self.relation, query)?;

        let dq = self.func.distance(query, &self.pivot).0;
        let mut heap: BinaryHeap<HeapEntry<DoubleDistance>> = BinaryHeap::with_capacity(k + 1);
        for row in 0..self.relation.len() {
            if heap.len() == k {
                let worst = heap.peek().map(|w| w.distance.0).unwrap_or(f64::INFINITY);
                // Lower bound exceeds the current k-th distance: cannot enter.
                if (self.pivot_dists[row] - dq).abs() > worst {
                    continue;
                }
            }
            heap.push(HeapEntry {
                oid: self.relation.oid_at(row),
                distance: self.func.distance(query, self.relation.vector_at(row)),
            });
            if heap.len() > k {
                heap.pop();
            }
        }
        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| Neighbor {
                oid: entry.oid,
                distance: entry.distance,
            })
            .collect())
    }

    fn range(
        &self,
        query: &[f64],
        radius: &DoubleDistance,
    ) -> Result<NeighborList<DoubleDistance>, CoreError> {
        check_dim(self.relation, query)?;
        check_radius(radius)?;

        let dq = self.func.distance(query, &self.pivot).0;
        Ok((0..self.relation.len())
            .filter(|&row| (self.pivot_dists[row] - dq).abs() <= radius.0)
            .map(|row| Neighbor {
                oid: self.relation.oid_at(row),
                distance: self.func.distance(query, self.relation.vector_at(row)),
            })
            .filter(|n| n.distance.cmp_asc(radius) != Ordering::Greater)
            .sorted_by(rank)
            .collect())
    }
}
