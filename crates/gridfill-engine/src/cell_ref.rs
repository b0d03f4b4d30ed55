//! Cell coordinates and A1-style formatting.
//!
//! Coordinates are zero-indexed `(row, col)`. The A1 form is only used for
//! display (log lines, table headers); the fill itself works on indices.
//!
//! # Examples
//!
//! ```
//! use gridfill_engine::CellRef;
//!
//! let cell = CellRef::new(2, 1);
//! assert_eq!(cell.to_string(), "B3");
//! assert_eq!(CellRef::col_to_letters(26), "AA");
//! ```

use std::fmt;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}
