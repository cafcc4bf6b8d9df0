//! Grid shape and card layout

use serde::{Deserialize, Serialize};

use crate::error::BingoError;
use crate::pool::Item;

/// Rows × columns of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells on a card (saturating; `validate` rejects overflow)
    pub const fn cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// `4x3` style fragment used in storage keys
    pub fn key_component(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<(), BingoError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BingoError::InvalidConfig(format!(
                "grid must have at least one row and column (got {})",
                self.key_component()
            )));
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(BingoError::InvalidConfig(format!(
                "grid {} has too many cells",
                self.key_component()
            )));
        }
        Ok(())
    }

    /// Whether a flattened cell position lies on the grid
    pub fn contains(&self, position: usize) -> bool {
        position < self.cells()
    }
}

/// One bingo card, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rows: Vec<Vec<Item>>,
}

impl Card {
    /// Split a flat sequence into rows of `cols` items
    pub fn from_flat(items: Vec<Item>, cols: usize) -> Self {
        let rows = items.chunks(cols.max(1)).map(<[Item]>::to_vec).collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Item>] {
        &self.rows
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    /// Cells in generation order; cell positions index into this
    pub fn cells(&self) -> impl Iterator<Item = &Item> {
        self.rows.iter().flatten()
    }

    pub fn flatten(&self) -> Vec<Item> {
        self.cells().cloned().collect()
    }

    pub fn cell(&self, position: usize) -> Option<&Item> {
        self.cells().nth(position)
    }
}
