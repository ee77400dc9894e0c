//! Cell storage with stable handles.
//!
//! Cells live in a dense vector of slots. Removing a cell tombstones its slot and
//! pushes the index on a free list for the next insertion, so a [`CellId`] stays
//! valid for exactly as long as its cell is tracked.

use crate::cell::{CellId, FlowCell};

/// Slot storage for the cells of one constraint.
#[derive(Debug)]
pub struct CellArena<P> {
    slots: Vec<Option<FlowCell<P>>>,
    free: Vec<usize>,
}

impl<P> CellArena<P> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `cell`, reusing a tombstoned slot when one is available.
    pub fn insert(&mut self, cell: FlowCell<P>) -> CellId {
        if let Some(index) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(index)
        {
            *slot = Some(cell);
            return CellId(index);
        }
        self.slots.push(Some(cell));
        CellId(self.slots.len() - 1)
    }

    /// Take the cell out of its slot. `None` when `id` is not tracked.
    pub fn remove(&mut self, id: CellId) -> Option<FlowCell<P>> {
        let cell = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(cell)
    }

    pub fn get(&self, id: CellId) -> Option<&FlowCell<P>> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut FlowCell<P>> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.get(id).is_some()
    }

    /// Number of tracked cells.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Drop every cell and forget all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<P> Default for CellArena<P> {
    fn default() -> Self {
        Self::new()
    }
}
