//! Search for free, 4-connected regions of an exact size.
//!
//! Both finders first try the preferred rectangle (cropped to the target size
//! in row-major order) and fall back to a breadth-first flood fill over free
//! cells.

use crate::{
    grid::{CellId, Grid},
    shape::Shape,
};
use std::collections::VecDeque;

/// Distinct cell indices forming one item's footprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    cells: Vec<usize>,
}

impl Region {
    pub fn new(cells: Vec<usize>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn into_cells(self) -> Vec<usize> {
        self.cells
    }
}

/// Find `target` free connected cells anywhere in the grid
pub fn find_region<Id>(grid: &Grid<Id>, target: usize, preferred: Shape) -> Option<Region> {
    if target == 0 || target > grid.free_count() {
        return None;
    }
    find_rectangle(grid, target, preferred).or_else(|| flood_fill_any(grid, target))
}

/// Find `target` free connected cells that include `anchor`
///
/// Returns `None` if the anchor is occupied, out of range, or its free
/// component is smaller than `target`.
pub fn find_region_including_cell<Id>(
    grid: &Grid<Id>,
    target: usize,
    anchor: CellId,
    preferred: Shape,
) -> Option<Region> {
    let start = grid.index_of(anchor)?;
    if target == 0 || !grid.is_free(start) {
        return None;
    }
    find_rectangle_around(grid, target, start, preferred).or_else(|| {
        let mut visited = vec![false; grid.capacity()];
        flood_fill_from(grid, start, target, &mut visited)
    })
}

/// Whether `cells` form a single 4-connected component
pub fn is_connected<Id>(grid: &Grid<Id>, cells: &[usize]) -> bool {
    let Some(&start) = cells.first() else {
        return false;
    };
    let mut member = vec![false; grid.capacity()];
    for &idx in cells {
        match member.get_mut(idx) {
            Some(slot) => *slot = true,
            None => return false,
        }
    }

    let mut reached = 1;
    let mut queue = VecDeque::from([start]);
    member[start] = false;
    while let Some(idx) = queue.pop_front() {
        for next in grid.neighbours(idx) {
            if member[next] {
                member[next] = false;
                reached += 1;
                queue.push_back(next);
            }
        }
    }
    reached == cells.len()
}

/// Preferred rectangle at `origin`, cropped to `target` cells, if all of them are free
fn rectangle_at<Id>(
    grid: &Grid<Id>,
    target: usize,
    shape: Shape,
    origin: CellId,
) -> Option<Region> {
    shape
        .footprint(target)
        .map(|(dr, dc)| {
            grid.index_of(CellId::new(origin.row + dr, origin.col + dc))
                .filter(|&idx| grid.is_free(idx))
        })
        .collect::<Option<Vec<_>>>()
        .map(Region::new)
}

/// First fitting origin in row-major order
fn find_rectangle<Id>(grid: &Grid<Id>, target: usize, shape: Shape) -> Option<Region> {
    if shape.area() < target {
        return None;
    }
    (0..grid.rows)
        .flat_map(|row| (0..grid.cols).map(move |col| CellId::new(row, col)))
        .find_map(|origin| rectangle_at(grid, target, shape, origin))
}

/// Every placement of the rectangle that covers `anchor`, trying each offset of
/// the anchor within the footprint
fn find_rectangle_around<Id>(
    grid: &Grid<Id>,
    target: usize,
    anchor: usize,
    shape: Shape,
) -> Option<Region> {
    if shape.area() < target {
        return None;
    }
    let at = grid.position(anchor);
    shape.footprint(target).find_map(|(dr, dc)| {
        let origin = CellId::new(at.row.checked_sub(dr)?, at.col.checked_sub(dc)?);
        rectangle_at(grid, target, shape, origin)
    })
}

/// Flood fill from each unvisited free cell in index order until a component
/// holds `target` cells
fn flood_fill_any<Id>(grid: &Grid<Id>, target: usize) -> Option<Region> {
    let mut visited = vec![false; grid.capacity()];
    (0..grid.capacity()).find_map(|start| {
        if visited[start] || !grid.is_free(start) {
            return None;
        }
        flood_fill_from(grid, start, target, &mut visited)
    })
}

/// BFS over free cells from `start`; yields the first `target` cells in visit
/// order. A component that runs out first is left fully marked in `visited`.
fn flood_fill_from<Id>(
    grid: &Grid<Id>,
    start: usize,
    target: usize,
    visited: &mut [bool],
) -> Option<Region> {
    let mut collected = Vec::with_capacity(target);
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(idx) = queue.pop_front() {
        collected.push(idx);
        if collected.len() == target {
            return Some(Region::new(collected));
        }
        for next in grid.neighbours(idx) {
            if !visited[next] && grid.is_free(next) {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    None
}
