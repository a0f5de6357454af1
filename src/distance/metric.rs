//! Distance functions over object coordinates.

use crate::distance::value::{DistanceValue, DoubleDistance};

/// A distance function between two object representations, producing a
/// [`DistanceValue`] of type `D`.
///
/// Swapping the implementation changes no other component; queries and the
/// clustering engine are parametrized over this trait.
pub trait DistanceFunction<D: DistanceValue>: Send + Sync {
    fn distance(&self, a: &[f64], b: &[f64]) -> D;

    /// Whether the triangle inequality holds. Pruning backends require a
    /// proper metric and reject attachment otherwise.
    fn is_metric(&self) -> bool {
        true
    }
}

/// Euclidean (L2) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl DistanceFunction<DoubleDistance> for EuclideanDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> DoubleDistance {
        debug_assert_eq!(a.len(), b.len(), "vectors must be the same length");
        DoubleDistance(
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
                .sqrt(),
        )
    }
}

/// Manhattan (L1) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl DistanceFunction<DoubleDistance> for ManhattanDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> DoubleDistance {
        debug_assert_eq!(a.len(), b.len(), "vectors must be the same length");
        DoubleDistance(a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum())
    }
}

/// Cosine distance: 1 - cosine similarity. Not a metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineDistance;

impl DistanceFunction<DoubleDistance> for CosineDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> DoubleDistance {
        debug_assert_eq!(a.len(), b.len(), "vectors must be the same length");
        let dot = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<f64>();
        let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        DoubleDistance(1.0 - (dot / (norm_a * norm_b + 1e-10))) // + epsilon to avoid NaNs
    }

    fn is_metric(&self) -> bool {
        false
    }
}
