use log::warn;
use serde::{Deserialize, Serialize};

/// Host policy deciding how many columns a grid of a given capacity has
pub trait GridShape {
    fn columns_for(&self, capacity: usize) -> usize;
}

impl<F: Fn(usize) -> usize> GridShape for F {
    fn columns_for(&self, capacity: usize) -> usize {
        self(capacity)
    }
}

/// Same width whatever the capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColumns(pub usize);

impl GridShape for FixedColumns {
    fn columns_for(&self, _capacity: usize) -> usize {
        self.0
    }
}

/// `ceil(sqrt(capacity))` columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareColumns;

impl GridShape for SquareColumns {
    fn columns_for(&self, capacity: usize) -> usize {
        let root = capacity.isqrt();
        if root * root < capacity { root + 1 } else { root }
    }
}

/// Up to `n` columns, fewer when the capacity is smaller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxWidthColumns(pub usize);

impl GridShape for MaxWidthColumns {
    fn columns_for(&self, capacity: usize) -> usize {
        capacity.min(self.0)
    }
}

/// Column policy as written in scenario files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ColumnPolicy {
    Fixed { value: usize },
    Square,
    MaxWidth { value: usize },
}

impl GridShape for ColumnPolicy {
    fn columns_for(&self, capacity: usize) -> usize {
        match *self {
            ColumnPolicy::Fixed { value } => FixedColumns(value).columns_for(capacity),
            ColumnPolicy::Square => SquareColumns.columns_for(capacity),
            ColumnPolicy::MaxWidth { value } => MaxWidthColumns(value).columns_for(capacity),
        }
    }
}

/// Ask the provider for a width, never less than one column
pub(crate) fn resolve_columns<S: GridShape + ?Sized>(shape: &S, capacity: usize) -> usize {
    match shape.columns_for(capacity) {
        0 => {
            warn!("Grid shape provider returned 0 columns for capacity {capacity}, using 1");
            1
        }
        cols => cols,
    }
}
