//! Reference backend: a full scan per query.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use itertools::Itertools;

use super::{
    Capabilities, HeapEntry, Neighbor, NeighborList, SimilarityIndex, check_dim, check_k,
    check_radius, rank,
};
use crate::distance::metric::DistanceFunction;
use crate::distance::value::DistanceValue;
use crate::relation::Relation;
use crate::utils::errors::CoreError;

/// Linear-scan backend. Supports every capability with any distance
/// function; every other backend must match its output.
pub struct LinearScan<'a, D: DistanceValue, F: DistanceFunction<D>> {
    relation: &'a Relation,
    func: F,
    _marker: PhantomData<D>,
}

impl<'a, D: DistanceValue, F: DistanceFunction<D>> LinearScan<'a, D, F> {
    pub const NAME: &'static str = "linear-scan";

    pub fn capabilities() -> Capabilities {
        Capabilities::all()
    }

    /// Attaches the backend to a dataset for the requested capabilities.
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
        Ok(Self {
            relation,
            func,
            _marker: PhantomData,
        })
    }
}

impl<'a, D: DistanceValue, F: DistanceFunction<D>> SimilarityIndex<D> for LinearScan<'a, D, F> {
    fn relation(&self) -> &Relation {
        self.relation
    }

    fn distance(&self, a: &[f64], b: &[f64]) -> D {
        self.func.distance(a, b)
    }

    fn knn(&self, query: &[f64], k: usize) -> Result<NeighborList<D>, CoreError> {
        check_k(k)?;
        check_dim(self.relation, query)?;

        let mut heap: BinaryHeap<HeapEntry<D>> = BinaryHeap::with_capacity(k + 1);
        for (oid, vec) in self.relation.iter() {
            heap.push(HeapEntry {
                oid,
                distance: self.func.distance(query, vec),
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

    fn range(&self, query: &[f64], radius: &D) -> Result<NeighborList<D>, CoreError> {
        check_dim(self.relation, query)?;
        check_radius(radius)?;

        Ok(self
            .relation
            .iter()
            .map(|(oid, vec)| Neighbor {
                oid,
                distance: self.func.distance(query, vec),
            })
            .filter(|n| n.distance.cmp_asc(radius) != Ordering::Greater)
            .sorted_by(rank)
            .collect())
    }
}
