//! gridfill_engine - Text grid model and the backfill/compaction fill.

mod cell_ref;
mod error;
pub mod fill;
mod grid;

pub use cell_ref::CellRef;
pub use error::FillError;
pub use fill::{CompactStats, FillStats, backfill, compact, fill, fill_in_place, fill_until_stable};
pub use grid::Grid;
