//! Read-only, ordered-by-OID view over the objects of one dataset.

use crate::utils::errors::CoreError;
use crate::utils::types::{Oid, Vector};

/// The dataset collaborator: a fixed-dimensionality set of objects, ordered
/// by OID. Treated as read-only for the duration of a query or clustering
/// run.
#[derive(Debug)]
pub struct Relation {
    dim: usize,
    oids: Vec<Oid>,
    vectors: Vec<Vector>,
}

impl Relation {
    /// An empty relation of the given dimensionality.
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            oids: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Builds a relation from `(OID, vector)` pairs in any order. Rejects
    /// vectors of the wrong dimensionality and duplicate OIDs.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(Oid, Vector)>) -> Result<Self, CoreError> {
        for (_, vector) in &pairs {
            if vector.len() != dim {
                return Err(CoreError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
        }
        pairs.sort_by_key(|&(oid, _)| oid);
        if let Some(dup) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CoreError::DuplicateOid(dup[0].0));
        }

        let mut oids = Vec::with_capacity(pairs.len());
        let mut vectors = Vec::with_capacity(pairs.len());
        for (oid, vector) in pairs {
            oids.push(oid);
            vectors.push(vector);
        }
        Ok(Self { dim, oids, vectors })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.oids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oids.is_empty()
    }

    pub fn contains(&self, oid: Oid) -> bool {
        self.oids.binary_search(&oid).is_ok()
    }

    /// Coordinates of the object named `oid`, if present.
    pub fn get(&self, oid: Oid) -> Option<&[f64]> {
        self.oids
            .binary_search(&oid)
            .ok()
            .map(|row| self.vectors[row].as_slice())
    }

    /// OID at `row` in ascending-OID order.
    pub fn oid_at(&self, row: usize) -> Oid {
        self.oids[row]
    }

    /// Coordinates at `row` in ascending-OID order.
    pub fn vector_at(&self, row: usize) -> &[f64] {
        &self.vectors[row]
    }

    /// Iterates all objects in ascending OID order.
    pub fn iter(&self) -> impl Iterator<Item = (Oid, &[f64])> + '_ {
        self.oids
            .iter()
            .zip(self.vectors.iter())
            .map(|(&oid, vector)| (oid, vector.as_slice()))
    }
}
