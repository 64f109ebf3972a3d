use crate::{
    error::{PackError, Result},
    region::Region,
    special::select_special_cells,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Debug, hash::Hash};

/// Grid position (row-major, row 0 on top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One unit of grid capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell<Id> {
    pub item: Option<Id>,
    pub is_center: bool,    // label cell of the item
    pub is_top_right: bool, // corner control cell of the item
}

impl<Id> Cell<Id> {
    pub fn free() -> Self {
        Self {
            item: None,
            is_center: false,
            is_top_right: false,
        }
    }

    pub fn is_free(&self) -> bool {
        self.item.is_none()
    }
}

impl<Id> Default for Cell<Id> {
    fn default() -> Self {
        Self::free()
    }
}

/// An item to be packed: opaque id plus the number of cells it occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackableItem<Id> {
    pub id: Id,
    pub amount: usize,
    /// Cell the item should grow from, if it has a known position
    pub anchor: Option<CellId>,
}

impl<Id: Debug> PackableItem<Id> {
    pub fn new(id: Id, amount: usize) -> Result<Self> {
        if amount == 0 {
            return Err(PackError::ZeroAmount {
                id: format!("{id:?}"),
            });
        }
        Ok(Self {
            id,
            amount,
            anchor: None,
        })
    }

    pub fn with_anchor(mut self, anchor: CellId) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

/// Packed grid
///
/// `cells.len()` is the capacity. When `rows * cols > capacity` the tail of the
/// last row is padding: those positions have no cell and are never free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<Id> {
    pub cells: Vec<Cell<Id>>,
    pub rows: usize,
    pub cols: usize,
}

impl<Id> Grid<Id> {
    /// All-free grid of `capacity` cells laid out `cols` wide
    pub fn empty(capacity: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self {
            cells: (0..capacity).map(|_| Cell::free()).collect(),
            rows: capacity.div_ceil(cols),
            cols,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Index of a position, `None` for padding or out-of-range positions
    pub fn index_of(&self, pos: CellId) -> Option<usize> {
        if pos.col >= self.cols {
            return None;
        }
        let idx = pos.row.checked_mul(self.cols)?.checked_add(pos.col)?;
        (idx < self.cells.len()).then_some(idx)
    }

    pub fn position(&self, index: usize) -> CellId {
        CellId::new(index / self.cols, index % self.cols)
    }

    pub fn is_free(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(Cell::is_free)
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_free()).count()
    }

    /// 4-neighbourhood of a cell in up, down, left, right order
    pub(crate) fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let CellId { row, col } = self.position(index);
        let up = row.checked_sub(1).map(|r| CellId::new(r, col));
        let down = Some(CellId::new(row + 1, col));
        let left = col.checked_sub(1).map(|c| CellId::new(row, c));
        let right = Some(CellId::new(row, col + 1));
        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter_map(move |pos| self.index_of(pos))
    }

    pub(crate) fn release(&mut self, indices: &[usize]) {
        for &idx in indices {
            if let Some(cell) = self.cells.get_mut(idx) {
                *cell = Cell::free();
            }
        }
    }
}

impl<Id: PartialEq> Grid<Id> {
    /// Cell indices held by `id`, ascending
    pub fn cells_of(&self, id: &Id) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.item.as_ref() == Some(id))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_placed(&self, id: &Id) -> bool {
        self.cells.iter().any(|c| c.item.as_ref() == Some(id))
    }

    pub fn center_of(&self, id: &Id) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.is_center && c.item.as_ref() == Some(id))
    }

    pub fn top_right_of(&self, id: &Id) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.is_top_right && c.item.as_ref() == Some(id))
    }
}

impl<Id: Clone + Eq + Hash> Grid<Id> {
    /// Placed ids in order of first appearance
    pub fn placed_ids(&self) -> Vec<Id> {
        let mut seen = HashSet::new();
        self.cells
            .iter()
            .filter_map(|c| c.item.as_ref())
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Ids placed in both grids whose cells differ
    pub fn moved_since(&self, previous: &Grid<Id>) -> Vec<Id> {
        self.placed_ids()
            .into_iter()
            .filter(|id| previous.is_placed(id) && previous.cells_of(id) != self.cells_of(id))
            .collect()
    }

    /// Copy cells of still-live items from `previous`, index by index, flags untouched
    pub(crate) fn retain_from(&mut self, previous: &Grid<Id>, live: &HashSet<&Id>) {
        for (cell, old) in self.cells.iter_mut().zip(&previous.cells) {
            if old.item.as_ref().is_some_and(|id| live.contains(id)) {
                *cell = old.clone();
            }
        }
    }

    /// Mark `region` as held by `id` and flag its center and top-right cells
    pub(crate) fn assign(&mut self, id: &Id, region: &Region) -> bool {
        let Some(special) = select_special_cells(region, self.cols) else {
            return false;
        };
        for &idx in region.cells() {
            self.cells[idx] = Cell {
                item: Some(id.clone()),
                is_center: idx == special.center,
                is_top_right: idx == special.top_right,
            };
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_dimensions() {
        let grid: Grid<u32> = Grid::empty(12, 4);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.capacity(), 12);
        assert_eq!(grid.free_count(), 12);
    }

    #[test]
    fn test_padding_is_not_addressable() {
        // 10 cells on 4 columns: last row holds only 2 cells
        let grid: Grid<u32> = Grid::empty(10, 4);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.capacity(), 10);
        assert_eq!(grid.index_of(CellId::new(2, 1)), Some(9));
        assert_eq!(grid.index_of(CellId::new(2, 2)), None);
        assert_eq!(grid.index_of(CellId::new(0, 4)), None);
        assert!(!grid.is_free(10));
    }

    #[test]
    fn test_zero_columns_clamped() {
        let grid: Grid<u32> = Grid::empty(3, 0);
        assert_eq!(grid.cols, 1);
        assert_eq!(grid.rows, 3);
    }

    #[test]
    fn test_neighbours_respect_edges_and_padding() {
        let grid: Grid<u32> = Grid::empty(10, 4);
        assert_eq!(grid.neighbours(0).collect::<Vec<_>>(), vec![4, 1]);
        assert_eq!(grid.neighbours(5).collect::<Vec<_>>(), vec![1, 9, 4, 6]);
        // cell 7 sits above padding
        assert_eq!(grid.neighbours(7).collect::<Vec<_>>(), vec![3, 6]);
    }

    #[test]
    fn test_assign_and_queries() {
        let mut grid: Grid<&str> = Grid::empty(12, 4);
        assert!(grid.assign(&"a", &Region::new(vec![0, 1, 4, 5])));
        assert_eq!(grid.cells_of(&"a"), vec![0, 1, 4, 5]);
        assert_eq!(grid.center_of(&"a"), Some(0));
        assert_eq!(grid.top_right_of(&"a"), Some(1));
        assert_eq!(grid.free_count(), 8);
        assert!(!grid.assign(&"b", &Region::new(vec![])));
        assert!(!grid.is_placed(&"b"));
    }

    #[test]
    fn test_retain_from_keeps_live_items_only() {
        let mut previous: Grid<&str> = Grid::empty(12, 4);
        previous.assign(&"a", &Region::new(vec![0, 1]));
        previous.assign(&"b", &Region::new(vec![2, 3]));

        let live: HashSet<&&str> = [&"b"].into_iter().collect();
        let mut grid = Grid::empty(12, 4);
        grid.retain_from(&previous, &live);

        assert!(!grid.is_placed(&"a"));
        assert_eq!(grid.cells[2], previous.cells[2]);
        assert_eq!(grid.cells[3], previous.cells[3]);
    }

    #[test]
    fn test_retain_from_shorter_previous() {
        let mut previous: Grid<&str> = Grid::empty(4, 4);
        previous.assign(&"a", &Region::new(vec![2, 3]));

        let live: HashSet<&&str> = [&"a"].into_iter().collect();
        let mut grid = Grid::empty(8, 4);
        grid.retain_from(&previous, &live);
        assert_eq!(grid.cells_of(&"a"), vec![2, 3]);
        assert_eq!(grid.capacity(), 8);
    }

    #[test]
    fn test_moved_since() {
        let mut before: Grid<&str> = Grid::empty(8, 4);
        before.assign(&"a", &Region::new(vec![0, 1]));
        before.assign(&"b", &Region::new(vec![2]));
        let mut after: Grid<&str> = Grid::empty(8, 4);
        after.assign(&"a", &Region::new(vec![0, 1]));
        after.assign(&"b", &Region::new(vec![7]));
        after.assign(&"c", &Region::new(vec![3]));
        assert_eq!(after.moved_since(&before), vec!["b"]);
    }

    #[test]
    fn test_packable_item_rejects_zero_amount() {
        assert!(PackableItem::new("a", 0).is_err());
        let item = PackableItem::new("a", 3).unwrap().with_anchor(CellId::new(1, 2));
        assert_eq!(item.anchor, Some(CellId::new(1, 2)));
    }
}
