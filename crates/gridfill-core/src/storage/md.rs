//! Markdown export functionality

use crate::error::Result;
use gridfill_engine::{CellRef, Grid};
use std::fmt::Write as _;
use std::path::Path;

/// Render the grid as a markdown table with A/B/C column headers
pub fn render_markdown(grid: &Grid) -> String {
    let mut out = String::new();

    if grid.is_empty() {
        out.push_str("*Empty grid*\n");
        return out;
    }

    // Header row with column letters
    out.push_str("|   |");
    for col in 0..grid.ncols() {
        let _ = write!(out, " {} |", CellRef::col_to_letters(col));
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in 0..grid.ncols() {
        out.push_str("---|");
    }
    out.push('\n');

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "| {} |", row + 1); // 1-based row numbers
        for cell in cells {
            let _ = write!(out, " {} |", escape_markdown(cell));
        }
        out.push('\n');
    }

    out
}

/// Write the grid to a markdown file
pub fn write_markdown(path: &Path, grid: &Grid) -> Result<()> {
    std::fs::write(path, render_markdown(grid))?;
    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
