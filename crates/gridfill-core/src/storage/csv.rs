//! CSV import/export functionality

use crate::error::{GridfillError, Result};
use gridfill_engine::Grid;
use log::warn;
use std::io::Write;
use std::path::Path;

const MAX_CSV_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB

/// Read a CSV file into a grid
pub fn parse_csv(path: &Path) -> Result<Grid> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CSV_FILE_BYTES {
        return Err(GridfillError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_CSV_FILE_BYTES,
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_csv_str(&content)
}

/// Parse CSV text into a grid.
///
/// Rows shorter than the widest row are padded with blank cells.
pub fn parse_csv_str(content: &str) -> Result<Grid> {
    let mut rows = parse_csv_records(content)
        .map_err(|(line, message)| GridfillError::Parse { line, message })?;

    if rows.is_empty() {
        return Err(GridfillError::EmptyCsv);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (idx, row) in rows.iter_mut().enumerate() {
        if row.len() < width {
            warn!(
                "record {}: {} of {} fields present, padding with blanks",
                idx + 1,
                row.len(),
                width
            );
            row.resize(width, String::new());
        }
    }

    Ok(Grid::from_rows(rows)?)
}

/// Split CSV text into records, handling quoted fields.
///
/// Field text is kept as written: a field holding only spaces is not blank.
/// Quoted fields may span line breaks. Both `\n` and `\r\n` end a record.
/// Errors carry the 1-based line where the failing record starts.
pub(crate) fn parse_csv_records(
    content: &str,
) -> std::result::Result<Vec<Vec<String>>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                pending = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut current));
                pending = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
                pending = false;
                record_line = line;
            }
            _ => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err((record_line, "unterminated quoted field".to_string()));
    }
    if pending {
        fields.push(current);
        records.push(fields);
    }
    Ok(records)
}

/// Render a grid as CSV text, one line per row
pub fn render_csv(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let fields: Vec<String> = row.iter().map(|f| escape_csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Export a grid to a CSV file
pub fn write_csv(path: &Path, grid: &Grid) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render_csv(grid).as_bytes())?;
    Ok(())
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    let needs_quotes = field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
        || field.trim() != field;
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
