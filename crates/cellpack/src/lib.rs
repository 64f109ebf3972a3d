//! Stable packing of sized items into a fixed-capacity cell grid.
//!
//! Every item gets one 4-connected block of cells with a center (label) cell and
//! a top-right (corner control) cell. Handing the previous grid back to
//! [`pack`] keeps unchanged items where they were.

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod memory;
pub mod pack;
pub mod provider;
pub mod region;
pub mod render;
pub mod shape;
pub mod special;

pub use config::Config;
pub use error::{PackError, Result};
pub use grid::{Cell, CellId, Grid, PackableItem};
pub use memory::LayoutMemory;
pub use pack::{PackReport, PackStrategy, pack, pack_with_report};
pub use provider::{ColumnPolicy, FixedColumns, GridShape, MaxWidthColumns, SquareColumns};
pub use region::{Region, find_region, find_region_including_cell, is_connected};
pub use render::{LayoutSummary, render_text};
pub use shape::{Shape, best_shape};
pub use special::{SpecialCells, select_special_cells};
