//! Error types for Gridfill core.

use gridfill_engine::FillError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, filling or saving a grid
#[derive(Error, Debug)]
pub enum GridfillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("CSV file is empty")]
    EmptyCsv,

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error(transparent)]
    Fill(#[from] FillError),
}

pub type Result<T> = std::result::Result<T, GridfillError>;
