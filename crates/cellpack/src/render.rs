//! Text map and serializable summary of a packed grid, for the CLI and logs.

use crate::{
    constants::{CENTER_MARK, FREE_MARK, ITEM_LABELS, OVERFLOW_LABEL, TOP_RIGHT_MARK},
    grid::{CellId, Grid},
    pack::{PackReport, PackStrategy},
};
use serde::Serialize;
use std::{collections::HashMap, fmt::Display, hash::Hash};

/// One placed item in a [`LayoutSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedItem<Id> {
    pub id: Id,
    pub cells: Vec<usize>,
    pub center: Option<CellId>,
    pub top_right: Option<CellId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSummary<Id> {
    pub rows: usize,
    pub cols: usize,
    pub capacity: usize,
    pub free: usize,
    pub strategy: PackStrategy,
    pub items: Vec<PlacedItem<Id>>,
    pub dropped: Vec<Id>,
}

impl<Id: Clone + Eq + Hash> LayoutSummary<Id> {
    pub fn from_report(report: &PackReport<Id>) -> Self {
        let grid = &report.grid;
        let items = grid
            .placed_ids()
            .into_iter()
            .map(|id| PlacedItem {
                cells: grid.cells_of(&id),
                center: grid.center_of(&id).map(|idx| grid.position(idx)),
                top_right: grid.top_right_of(&id).map(|idx| grid.position(idx)),
                id,
            })
            .collect();
        Self {
            rows: grid.rows,
            cols: grid.cols,
            capacity: grid.capacity(),
            free: grid.free_count(),
            strategy: report.strategy,
            items,
            dropped: report.dropped.clone(),
        }
    }
}

/// Labels handed out in order of first appearance
fn item_labels<Id: Clone + Eq + Hash>(grid: &Grid<Id>) -> HashMap<Id, char> {
    let mut labels = ITEM_LABELS.chars().chain(std::iter::repeat(OVERFLOW_LABEL));
    grid.placed_ids()
        .into_iter()
        .map(|id| (id, labels.next().unwrap_or(OVERFLOW_LABEL)))
        .collect()
}

/// Row-per-line map of the grid followed by a legend
///
/// Each cell prints as its item label plus a mark: `*` on the center cell,
/// `^` on the top-right cell when it is not also the center.
pub fn render_text<Id: Clone + Eq + Hash + Display>(grid: &Grid<Id>) -> String {
    let labels = item_labels(grid);
    let mut out = String::new();

    for row in grid.cells.chunks(grid.cols) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match &cell.item {
                None => format!("{FREE_MARK} "),
                Some(id) => {
                    let label = labels.get(id).copied().unwrap_or(OVERFLOW_LABEL);
                    let mark = if cell.is_center {
                        CENTER_MARK
                    } else if cell.is_top_right {
                        TOP_RIGHT_MARK
                    } else {
                        ' '
                    };
                    format!("{label}{mark}")
                }
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }

    for id in grid.placed_ids() {
        let label = labels.get(&id).copied().unwrap_or(OVERFLOW_LABEL);
        out.push_str(&format!("{label} = {id} ({} cells)\n", grid.cells_of(&id).len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::PackableItem, pack::pack_with_report, provider::FixedColumns};

    fn report() -> PackReport<String> {
        let items = [
            PackableItem::new("sword".to_string(), 4).unwrap(),
            PackableItem::new("potion".to_string(), 2).unwrap(),
        ];
        pack_with_report(&items, 10, None, &FixedColumns(4))
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report().grid);
        let expected = "\
A* A^ B* .
A  A  B  .
.  .
A = sword (4 cells)
B = potion (2 cells)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary() {
        let summary = LayoutSummary::from_report(&report());
        assert_eq!((summary.rows, summary.cols, summary.capacity), (3, 4, 10));
        assert_eq!(summary.free, 4);
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.items[0].id, "sword");
        assert_eq!(summary.items[0].center, Some(CellId::new(0, 0)));
        assert_eq!(summary.items[0].top_right, Some(CellId::new(0, 1)));
        assert_eq!(summary.items[1].cells, vec![2, 6]);
        assert!(summary.dropped.is_empty());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["strategy"], "incremental");
        assert_eq!(json["items"][1]["top_right"]["row"], 0);
    }
}
