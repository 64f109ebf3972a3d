use crate::region::Region;
use std::cmp::Reverse;

/// Cells of a region that carry the item label and its corner control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialCells {
    pub center: usize,
    pub top_right: usize,
}

/// Pick the center and top-right cells of `region` on a grid `cols` wide
///
/// The center is the member nearest to the region's mean (row, col), first
/// member winning ties. The top-right cell is on the topmost row, rightmost
/// among those. `None` only for an empty region.
pub fn select_special_cells(region: &Region, cols: usize) -> Option<SpecialCells> {
    let cols = cols.max(1);
    let cells = region.cells();
    let first = *cells.first()?;

    let n = cells.len() as f64;
    let (sum_row, sum_col) = cells.iter().fold((0.0, 0.0), |(r, c), &idx| {
        (r + (idx / cols) as f64, c + (idx % cols) as f64)
    });
    let (mean_row, mean_col) = (sum_row / n, sum_col / n);
    let distance = |idx: usize| {
        let dr = (idx / cols) as f64 - mean_row;
        let dc = (idx % cols) as f64 - mean_col;
        dr * dr + dc * dc
    };

    let mut center = (first, distance(first));
    for &idx in &cells[1..] {
        let d = distance(idx);
        if d < center.1 {
            center = (idx, d);
        }
    }

    let top_right = cells
        .iter()
        .copied()
        .min_by_key(|&idx| (idx / cols, Reverse(idx % cols)))
        .unwrap_or(first);

    Some(SpecialCells {
        center: center.0,
        top_right,
    })
}
