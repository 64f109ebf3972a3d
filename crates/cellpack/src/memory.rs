use crate::{
    grid::{Grid, PackableItem},
    pack::{PackReport, pack_with_report},
    provider::GridShape,
};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Last packed grid per container, owned by the caller
///
/// Each key stands for one logical container (one inventory, one panel).
/// Packing through the memory hands the container's previous grid to
/// [`pack_with_report`] and stores the result for the next call.
#[derive(Debug, Clone)]
pub struct LayoutMemory<K, Id> {
    grids: HashMap<K, Grid<Id>>,
}

impl<K, Id> Default for LayoutMemory<K, Id> {
    fn default() -> Self {
        Self {
            grids: HashMap::new(),
        }
    }
}

impl<K, Id> LayoutMemory<K, Id>
where
    K: Eq + Hash,
    Id: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&Grid<Id>> {
        self.grids.get(key)
    }

    pub fn pack_with<S: GridShape + ?Sized>(
        &mut self,
        key: K,
        items: &[PackableItem<Id>],
        capacity: usize,
        shape: &S,
    ) -> PackReport<Id> {
        let report = pack_with_report(items, capacity, self.grids.get(&key), shape);
        self.grids.insert(key, report.grid.clone());
        report
    }

    /// Drop the stored grid of one container
    pub fn forget(&mut self, key: &K) -> Option<Grid<Id>> {
        self.grids.remove(key)
    }

    pub fn clear(&mut self) {
        self.grids.clear();
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
