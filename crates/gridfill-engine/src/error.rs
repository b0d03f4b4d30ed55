//! Error types for the fill engine.

use thiserror::Error;

/// Errors raised while building or filling a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    /// The fill needs at least one row and two columns.
    #[error("Invalid grid shape {rows}x{cols}: need at least 1 row and 2 columns")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid still changing after {passes} passes")]
    NoFixedPoint { passes: usize },
}
