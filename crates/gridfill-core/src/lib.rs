//! gridfill-core - Grid storage (CSV in/out, Markdown out) on top of the fill engine.

pub mod error;
pub mod storage;

pub use error::{GridfillError, Result};

pub use gridfill_engine::{CellRef, FillError, Grid};
