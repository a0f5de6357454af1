//! The similarity query contract: exact KNN, range and reverse-KNN queries
//! over one dataset and one distance function.

pub mod linear;
pub mod pivot;

use std::cmp::Ordering;

use bitflags::bitflags;

use crate::distance::value::DistanceValue;
use crate::relation::Relation;
use crate::utils::errors::CoreError;
use crate::utils::types::Oid;

bitflags! {
    /// Query operations a backend can be attached for. A backend that cannot
    /// honor a requested capability rejects attachment instead of silently
    /// approximating.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u32 {
        const KNN = 1;
        const RANGE = 1 << 1;
        const RKNN = 1 << 2;
    }
}

/// One entry of a query result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<D> {
    pub oid: Oid,
    pub distance: D,
}

/// Result lists are sorted ascending by `(distance, OID)`.
pub type NeighborList<D> = Vec<Neighbor<D>>;

/// Ranking order for result lists: ascending distance, ties broken by
/// ascending OID so repeated queries on static data are byte-identical.
pub(crate) fn rank<D: DistanceValue>(a: &Neighbor<D>, b: &Neighbor<D>) -> Ordering {
    a.distance
        .cmp_asc(&b.distance)
        .then_with(|| a.oid.cmp(&b.oid))
}

/// Max-heap entry for collecting the k best candidates: the worst candidate
/// under [`rank`] sits on top.
pub(crate) struct HeapEntry<D> {
    pub(crate) oid: Oid,
    pub(crate) distance: D,
}

impl<D: DistanceValue> PartialEq for HeapEntry<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D: DistanceValue> Eq for HeapEntry<D> {}

impl<D: DistanceValue> PartialOrd for HeapEntry<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: DistanceValue> Ord for HeapEntry<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp_asc(&other.distance)
            .then_with(|| self.oid.cmp(&other.oid))
    }
}

pub(crate) fn check_k(k: usize) -> Result<(), CoreError> {
    if k == 0 {
        return Err(CoreError::ContractViolation("k must be positive".into()));
    }
    Ok(())
}

pub(crate) fn check_dim(relation: &Relation, query: &[f64]) -> Result<(), CoreError> {
    if query.len() != relation.dim() {
        return Err(CoreError::DimensionMismatch {
            expected: relation.dim(),
            actual: query.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_radius<D: DistanceValue>(radius: &D) -> Result<(), CoreError> {
    if radius.is_undefined() {
        return Err(CoreError::ContractViolation(
            "radius must not be the undefined sentinel".into(),
        ));
    }
    Ok(())
}

/// Exact similarity queries over a fixed dataset and distance function.
///
/// Every implementation must produce identical result lists for identical
/// arguments, independent of dataset insertion order and of which backend
/// services the query. Queries are read-only and safe to run concurrently as
/// long as the dataset is not structurally mutated.
pub trait SimilarityIndex<D: DistanceValue> {
    fn relation(&self) -> &Relation;

    /// The attached distance function applied to two coordinate slices.
    fn distance(&self, a: &[f64], b: &[f64]) -> D;

    /// The `min(k, |dataset|)` nearest objects to `query`, sorted ascending.
    fn knn(&self, query: &[f64], k: usize) -> Result<NeighborList<D>, CoreError>;

    /// Every stored object within `radius` of `query` (inclusive), sorted
    /// ascending. An infinite radius returns the full dataset.
    fn range(&self, query: &[f64], radius: &D) -> Result<NeighborList<D>, CoreError>;

    /// Every stored object whose k nearest neighbors include the query
    /// object. A candidate tied with its own k-th neighbor distance is
    /// included, so all ties at the k-th position count.
    ///
    /// This naive derivation (one `knn` per candidate) is the canonical
    /// semantics; backends overriding it must return the identical set.
    fn rknn(&self, query: Oid, k: usize) -> Result<NeighborList<D>, CoreError> {
        check_k(k)?;
        let qvec = self
            .relation()
            .get(query)
            .ok_or(CoreError::NotFound(query))?;

        let mut out = Vec::new();
        for (oid, vec) in self.relation().iter() {
            let nn = self.knn(vec, k)?;
            let Some(kth) = nn.last() else { continue };
            let d = self.distance(vec, qvec);
            if d.cmp_asc(&kth.distance) != Ordering::Greater {
                out.push(Neighbor { oid, distance: d });
            }
        }
        out.sort_by(rank);
        Ok(out)
    }
}
