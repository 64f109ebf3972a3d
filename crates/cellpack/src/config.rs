use crate::{
    constants::{MAX_CAPACITY, MIN_CAPACITY},
    error::{PackError, Result},
    grid::{CellId, Grid, PackableItem},
    provider::{ColumnPolicy, resolve_columns},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// Scenario file: one grid and a sequence of item sets packed in turn
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub grid: GridConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GridConfig {
    pub capacity: usize,
    pub columns: ColumnPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub id: String,
    pub amount: usize,
    #[serde(default)]
    pub anchor: Option<CellId>,
}

impl Config {
    /// Read and validate a scenario file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PackError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate scenario text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let capacity = self.grid.capacity;
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(PackError::Capacity {
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
                got: capacity,
            });
        }

        match self.grid.columns {
            ColumnPolicy::Fixed { value: 0 } | ColumnPolicy::MaxWidth { value: 0 } => {
                return Err(PackError::Config(
                    "columns.value must be positive".to_string(),
                ));
            }
            _ => {}
        }

        if self.steps.is_empty() {
            return Err(PackError::Config(
                "at least one [[steps]] entry is required".to_string(),
            ));
        }

        let layout: Grid<()> = Grid::empty(capacity, self.columns());
        for (n, step) in self.steps.iter().enumerate() {
            let step_name = step.label(n);
            let mut ids = HashSet::new();
            for item in &step.items {
                if item.amount == 0 {
                    return Err(PackError::Config(format!(
                        "step '{step_name}': item '{}' has zero amount",
                        item.id
                    )));
                }
                if !ids.insert(item.id.as_str()) {
                    return Err(PackError::Config(format!(
                        "step '{step_name}': duplicate item id '{}'",
                        item.id
                    )));
                }
                if let Some(anchor) = item.anchor
                    && layout.index_of(anchor).is_none()
                {
                    return Err(PackError::Config(format!(
                        "step '{step_name}': anchor ({}, {}) of item '{}' is outside the {}x{} grid",
                        anchor.row, anchor.col, item.id, layout.rows, layout.cols
                    )));
                }
            }
        }

        Ok(())
    }

    /// Column count of the configured grid
    pub fn columns(&self) -> usize {
        resolve_columns(&self.grid.columns, self.grid.capacity)
    }
}

impl StepConfig {
    /// Step name, or its 1-based position when unnamed
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("step {}", index + 1))
    }

    pub fn to_items(&self) -> Result<Vec<PackableItem<String>>> {
        self.items
            .iter()
            .map(|item| {
                let packable = PackableItem::new(item.id.clone(), item.amount)?;
                Ok(match item.anchor {
                    Some(anchor) => packable.with_anchor(anchor),
                    None => packable,
                })
            })
            .collect()
    }
}
