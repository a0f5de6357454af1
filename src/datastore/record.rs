//! Record stores: several logically-parallel per-object columns bundled
//! under one OID remap.

use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

use super::stores::StoreHints;
use crate::utils::types::Oid;

/// Typed handle naming one column of a [`RecordStore`].
///
/// Handles are only valid for the store that created them; using one against
/// another store with a different column layout panics.
pub struct ColumnHandle<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> Clone for ColumnHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColumnHandle<T> {}

trait Column: Any {
    fn grow_to(&mut self, len: usize);
    fn reset(&mut self, slot: usize);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct ColumnVec<T: Clone> {
    default: T,
    values: Vec<T>,
}

impl<T: Clone + 'static> Column for ColumnVec<T> {
    fn grow_to(&mut self, len: usize) {
        if self.values.len() < len {
            self.values.resize(len, self.default.clone());
        }
    }

    fn reset(&mut self, slot: usize) {
        if slot < self.values.len() {
            self.values[slot] = self.default.clone();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Struct-of-arrays store: every column shares one dense OID→slot remap, so
/// columns of the same record sit at the same slot across parallel vectors.
///
/// Columns are independently typed and independently defaulted; resetting one
/// column's value leaves its siblings untouched.
pub struct RecordStore {
    expected: usize,
    slots: BTreeMap<Oid, usize>,
    columns: Vec<Box<dyn Column>>,
}

impl RecordStore {
    pub fn new(expected: usize, _hints: StoreHints) -> Self {
        Self {
            expected,
            slots: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    /// Adds a column with its own default value and returns its handle.
    /// Columns added after rows exist start out at the default everywhere.
    pub fn add_column<T: Clone + 'static>(&mut self, default: T) -> ColumnHandle<T> {
        let mut column = ColumnVec {
            default,
            values: Vec::with_capacity(self.expected),
        };
        column.grow_to(self.slots.len());
        self.columns.push(Box::new(column));
        ColumnHandle {
            index: self.columns.len() - 1,
            _marker: PhantomData,
        }
    }

    fn column<T: Clone + 'static>(&self, handle: ColumnHandle<T>) -> &ColumnVec<T> {
        self.columns[handle.index]
            .as_any()
            .downcast_ref::<ColumnVec<T>>()
            .expect("column handle does not belong to this store")
    }

    /// Latest value in `handle`'s column for `oid`, or that column's default.
    pub fn get<T: Clone + 'static>(&self, handle: ColumnHandle<T>, oid: Oid) -> T {
        let column = self.column(handle);
        match self.slots.get(&oid) {
            Some(&slot) if slot < column.values.len() => column.values[slot].clone(),
            _ => column.default.clone(),
        }
    }

    pub fn put<T: Clone + 'static>(&mut self, handle: ColumnHandle<T>, oid: Oid, value: T) {
        let slot = match self.slots.get(&oid) {
            Some(&slot) => slot,
            None => {
                let slot = self.slots.len();
                self.slots.insert(oid, slot);
                for column in &mut self.columns {
                    column.grow_to(slot + 1);
                }
                slot
            }
        };
        let column = self.columns[handle.index]
            .as_any_mut()
            .downcast_mut::<ColumnVec<T>>()
            .expect("column handle does not belong to this store");
        column.values[slot] = value;
    }

    /// Resets `oid` to the default in `handle`'s column only.
    pub fn delete<T: Clone + 'static>(&mut self, handle: ColumnHandle<T>, oid: Oid) {
        if let Some(&slot) = self.slots.get(&oid) {
            self.columns[handle.index].reset(slot);
        }
    }

    /// Restartable sweep over one column in ascending OID order.
    pub fn iter<T: Clone + 'static>(
        &self,
        handle: ColumnHandle<T>,
    ) -> impl Iterator<Item = (Oid, T)> + '_ {
        let column = self.column(handle);
        self.slots.iter().map(move |(&oid, &slot)| {
            let value = if slot < column.values.len() {
                column.values[slot].clone()
            } else {
                column.default.clone()
            };
            (oid, value)
        })
    }

    /// Number of tracked records.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
