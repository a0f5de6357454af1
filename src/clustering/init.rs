//! Initializer collaborators: strategies producing the k initial
//! representative points.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::relation::Relation;
use crate::utils::errors::CoreError;
use crate::utils::types::Vector;

/// Produces k initial representative points for a dataset. Restart or
/// multi-seeding policies live behind this seam, not in the engine.
pub trait Initializer {
    fn initial_representatives(
        &self,
        relation: &Relation,
        k: usize,
    ) -> Result<Vec<Vector>, CoreError>;
}

/// Uniform random sample of k distinct objects. When k exceeds the dataset
/// size, objects are reused cyclically so the engine still receives exactly
/// k points.
pub struct RandomSample {
    seed: u64,
}

impl RandomSample {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Initializer for RandomSample {
    fn initial_representatives(
        &self,
        relation: &Relation,
        k: usize,
    ) -> Result<Vec<Vector>, CoreError> {
        if relation.is_empty() {
            return Ok(Vec::new());
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        if k <= relation.len() {
            let picks = index::sample(&mut rng, relation.len(), k);
            Ok(picks
                .iter()
                .map(|row| relation.vector_at(row).to_vec())
                .collect())
        } else {
            Ok((0..k)
                .map(|i| relation.vector_at(i % relation.len()).to_vec())
                .collect())
        }
    }
}

/// The first k objects in OID order, reused cyclically when k exceeds the
/// dataset size. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstK;

impl Initializer for FirstK {
    fn initial_representatives(
        &self,
        relation: &Relation,
        k: usize,
    ) -> Result<Vec<Vector>, CoreError> {
        if relation.is_empty() {
            return Ok(Vec::new());
        }
        Ok((0..k)
            .map(|i| relation.vector_at(i % relation.len()).to_vec())
            .collect())
    }
}
