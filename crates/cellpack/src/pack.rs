//! Packing orchestration: an incremental pass that keeps the previous layout,
//! and a full repack by descending size when the incremental pass deadlocks.

use crate::{
    grid::{CellId, Grid, PackableItem},
    provider::{GridShape, resolve_columns},
    region::{find_region, find_region_including_cell, is_connected},
    shape::best_shape,
};
use log::{debug, warn};
use serde::Serialize;
use std::{collections::HashSet, fmt::Debug, hash::Hash};

/// Which pass produced a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackStrategy {
    Incremental,
    FullRepack,
}

/// Grid plus what happened while packing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport<Id> {
    pub grid: Grid<Id>,
    pub strategy: PackStrategy,
    /// Items left out of the grid, in placement order
    pub dropped: Vec<Id>,
}

/// Pack `items` into a grid of `capacity` cells, keeping what still fits from `previous`
pub fn pack<Id, S>(
    items: &[PackableItem<Id>],
    capacity: usize,
    previous: Option<&Grid<Id>>,
    shape: &S,
) -> Grid<Id>
where
    Id: Clone + Eq + Hash + Debug,
    S: GridShape + ?Sized,
{
    pack_with_report(items, capacity, previous, shape).grid
}

/// Same as [`pack`], also reporting the strategy used and the dropped items
pub fn pack_with_report<Id, S>(
    items: &[PackableItem<Id>],
    capacity: usize,
    previous: Option<&Grid<Id>>,
    shape: &S,
) -> PackReport<Id>
where
    Id: Clone + Eq + Hash + Debug,
    S: GridShape + ?Sized,
{
    let cols = resolve_columns(shape, capacity);
    let items = live_items(items);

    if let Some(grid) = incremental_pass(&items, capacity, cols, previous) {
        return PackReport {
            grid,
            strategy: PackStrategy::Incremental,
            dropped: Vec::new(),
        };
    }

    debug!(
        "Incremental pass failed for {} items in {} cells, repacking",
        items.len(),
        capacity
    );
    let (grid, dropped) = full_repack(&items, capacity, cols);
    PackReport {
        grid,
        strategy: PackStrategy::FullRepack,
        dropped,
    }
}

/// Items that take part in packing: first occurrence of each id, positive amounts only
fn live_items<Id>(items: &[PackableItem<Id>]) -> Vec<&PackableItem<Id>>
where
    Id: Eq + Hash + Debug,
{
    let mut seen = HashSet::new();
    let mut live = Vec::with_capacity(items.len());
    for item in items {
        if item.amount == 0 {
            warn!("Ignoring item {:?} with zero amount", item.id);
            continue;
        }
        if !seen.insert(&item.id) {
            warn!("Ignoring duplicate item {:?}", item.id);
            continue;
        }
        live.push(item);
    }
    live
}

/// Seed from `previous`, then place the remaining items in input order.
/// `None` as soon as one item finds no region.
fn incremental_pass<Id>(
    items: &[&PackableItem<Id>],
    capacity: usize,
    cols: usize,
    previous: Option<&Grid<Id>>,
) -> Option<Grid<Id>>
where
    Id: Clone + Eq + Hash + Debug,
{
    let mut grid = Grid::empty(capacity, cols);
    if let Some(previous) = previous {
        if previous.cols != cols || previous.capacity() != capacity {
            debug!(
                "Previous grid is {}x{} over {} cells, now {}x{} over {}",
                previous.rows,
                previous.cols,
                previous.capacity(),
                grid.rows,
                grid.cols,
                capacity
            );
        }
        let live: HashSet<&Id> = items.iter().map(|item| &item.id).collect();
        grid.retain_from(previous, &live);
    }

    // Release anything no longer matching its item before placing, so
    // re-placed items see all the space they can grow into
    let mut unplaced: Vec<(&PackableItem<Id>, Option<CellId>)> = Vec::new();
    for &item in items {
        let held = grid.cells_of(&item.id);
        if held.len() == item.amount && is_connected(&grid, &held) {
            continue;
        }
        if !held.is_empty() {
            debug!(
                "Item {:?} held {} cells, needs {}; re-placing",
                item.id,
                held.len(),
                item.amount
            );
        }
        let anchor = item
            .anchor
            .or_else(|| held.first().map(|&idx| grid.position(idx)));
        grid.release(&held);
        unplaced.push((item, anchor));
    }

    for (item, anchor) in unplaced {
        let preferred = best_shape(item.amount, cols);
        if let Some(pos) = anchor
            && grid.index_of(pos).is_none()
        {
            warn!(
                "Anchor ({}, {}) of item {:?} is outside the grid",
                pos.row, pos.col, item.id
            );
        }
        let region = anchor
            .and_then(|pos| find_region_including_cell(&grid, item.amount, pos, preferred))
            .or_else(|| find_region(&grid, item.amount, preferred));
        let Some(region) = region else {
            debug!("No region of {} cells for item {:?}", item.amount, item.id);
            return None;
        };
        if !grid.assign(&item.id, &region) {
            return None;
        }
    }
    Some(grid)
}

/// Fresh grid, largest items first, no anchors. Items that do not fit are skipped.
fn full_repack<Id>(
    items: &[&PackableItem<Id>],
    capacity: usize,
    cols: usize,
) -> (Grid<Id>, Vec<Id>)
where
    Id: Clone + Eq + Hash + Debug,
{
    let mut order = items.to_vec();
    order.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut grid = Grid::empty(capacity, cols);
    let mut dropped = Vec::new();
    for item in order {
        let placed = find_region(&grid, item.amount, best_shape(item.amount, cols))
            .is_some_and(|region| grid.assign(&item.id, &region));
        if !placed {
            warn!(
                "Dropping item {:?}: no connected free region of {} cells ({} free)",
                item.id,
                item.amount,
                grid.free_count()
            );
            dropped.push(item.id.clone());
        }
    }
    (grid, dropped)
}
