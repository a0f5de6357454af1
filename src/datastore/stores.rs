//! Per-object scalar state keyed by OID.

use std::collections::BTreeMap;

use bitflags::bitflags;
use itertools::Either;

use crate::utils::types::Oid;

bitflags! {
    /// Access-pattern hints supplied at store creation.
    ///
    /// Hints only influence the physical representation; observable behavior
    /// is identical whichever backend ends up chosen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StoreHints: u32 {
        /// Discarded when the algorithm run that created it completes.
        const TEMP = 1;
        /// Read and written on every iteration.
        const HOT = 1 << 1;
        /// The keyed object set does not change after the first pass.
        const STATIC = 1 << 2;
    }
}

enum Backend<T> {
    /// Dense value slots behind an ordered OID remap; favors stores that are
    /// swept and rewritten every iteration.
    Dense {
        slots: BTreeMap<Oid, usize>,
        values: Vec<T>,
    },
    /// Plain ordered map; favors sparse or short-lived stores.
    Map(BTreeMap<Oid, T>),
}

/// A mapping from OID to a mutable value of type `T` with a declared default.
///
/// Reads never fail: an OID that was never `put` yields the default, which
/// spares iterative algorithms the "not yet assigned" sentinel checks.
pub struct ScalarStore<T: Clone> {
    default: T,
    backend: Backend<T>,
}

impl<T: Clone> ScalarStore<T> {
    /// Creates a store expecting roughly `expected` keyed objects.
    pub fn new(expected: usize, hints: StoreHints, default: T) -> Self {
        let backend = if hints.intersects(StoreHints::HOT | StoreHints::STATIC) {
            Backend::Dense {
                slots: BTreeMap::new(),
                values: Vec::with_capacity(expected),
            }
        } else {
            Backend::Map(BTreeMap::new())
        };
        Self { default, backend }
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Latest value for `oid`, or the declared default if never put.
    pub fn get(&self, oid: Oid) -> T {
        match &self.backend {
            Backend::Dense { slots, values } => slots
                .get(&oid)
                .map(|&slot| values[slot].clone())
                .unwrap_or_else(|| self.default.clone()),
            Backend::Map(map) => map
                .get(&oid)
                .cloned()
                .unwrap_or_else(|| self.default.clone()),
        }
    }

    pub fn put(&mut self, oid: Oid, value: T) {
        match &mut self.backend {
            Backend::Dense { slots, values } => match slots.get(&oid) {
                Some(&slot) => values[slot] = value,
                None => {
                    slots.insert(oid, values.len());
                    values.push(value);
                }
            },
            Backend::Map(map) => {
                map.insert(oid, value);
            }
        }
    }

    /// Resets `oid` to the default. Backing capacity is retained.
    pub fn delete(&mut self, oid: Oid) {
        match &mut self.backend {
            Backend::Dense { slots, values } => {
                if let Some(&slot) = slots.get(&oid) {
                    values[slot] = self.default.clone();
                }
            }
            Backend::Map(map) => {
                if map.contains_key(&oid) {
                    map.insert(oid, self.default.clone());
                }
            }
        }
    }

    /// Restartable sweep over every tracked OID in ascending order, reading
    /// the latest value at each step. The borrow rules already forbid
    /// mutation mid-sweep.
    pub fn iter(&self) -> impl Iterator<Item = (Oid, T)> + '_ {
        match &self.backend {
            Backend::Dense { slots, values } => Either::Left(
                slots
                    .iter()
                    .map(move |(&oid, &slot)| (oid, values[slot].clone())),
            ),
            Backend::Map(map) => {
                Either::Right(map.iter().map(|(&oid, value)| (oid, value.clone())))
            }
        }
    }

    /// Number of tracked OIDs (explicitly put at least once).
    pub fn len(&self) -> usize {
        match &self.backend {
            Backend::Dense { slots, .. } => slots.len(),
            Backend::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
