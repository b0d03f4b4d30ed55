//! Dense text grid.

use crate::cell_ref::CellRef;
use crate::error::FillError;
use std::ops::Index;

/// Rectangular grid of text cells, stored row-major.
///
/// A blank cell holds the empty string. There is no separate "missing"
/// state: `""` is the only blank marker the fill recognises.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl Grid {
    /// Create an all-blank grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![String::new(); rows * cols],
        }
    }

    /// Build a grid from row vectors. Every row must have the same length.
    pub fn from_rows<R, S>(rows: R) -> Result<Self, FillError>
    where
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let mut cells = Vec::new();
        let mut nrows = 0usize;
        let mut ncols: Option<usize> = None;

        for (idx, row) in rows.into_iter().enumerate() {
            let expected = *ncols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(FillError::RaggedRow {
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend(row.into_iter().map(Into::into));
            nrows += 1;
        }

        Ok(Grid {
            rows: nrows,
            cols: ncols.unwrap_or(0),
            cells,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// True if the grid holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell {} out of bounds for {}x{} grid",
            CellRef::new(row, col),
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Cell value, or None when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col].as_str())
        } else {
            None
        }
    }

    /// Replace a cell value. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        let idx = self.offset(row, col);
        self.cells[idx] = value.into();
    }

    /// Take a cell's value, leaving it blank.
    pub(crate) fn take(&mut self, row: usize, col: usize) -> String {
        let idx = self.offset(row, col);
        std::mem::take(&mut self.cells[idx])
    }

    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        self[(row, col)].is_empty()
    }

    pub fn row(&self, row: usize) -> &[String] {
        assert!(row < self.rows, "row {} out of bounds ({} rows)", row, self.rows);
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        let cols = self.cols;
        let mut out = Vec::with_capacity(self.rows);
        let mut cells = self.cells.into_iter();
        for _ in 0..self.rows {
            out.push(cells.by_ref().take(cols).collect());
        }
        out
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = str;

    fn index(&self, (row, col): (usize, usize)) -> &str {
        &self.cells[self.offset(row, col)]
    }
}
