//! Backward fill and overflow compaction.
//!
//! A fill runs two passes over the grid:
//!
//! 1. **Backfill**, columns right-to-left (`C-2` down to `0`), rows top to
//!    bottom starting at row 1. A blank cell whose right neighbour is not
//!    blank takes the value of the cell directly above it. Row 0 is never
//!    written.
//! 2. **Compaction**, columns left-to-right (`1` up to `C-1`), every row.
//!    When a cell is blank and its left neighbour is not, the neighbour's
//!    value moves into the overflow column (`C-1`) and the neighbour is
//!    cleared. A later column overwrites an earlier move in the same row.
//!
//! Both passes read their own writes, so iteration order is part of the
//! result and neither pass can be reordered or split.

use crate::cell_ref::CellRef;
use crate::error::FillError;
use crate::grid::Grid;
use log::{debug, trace};

/// Outcome of the compaction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactStats {
    /// Values moved into the overflow column.
    pub moved: usize,
    /// Moves that overwrote a non-blank overflow value.
    pub displaced: usize,
}

/// Outcome of a full fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Cells that received a non-blank value in the backfill pass.
    pub backfilled: usize,
    pub moved: usize,
    pub displaced: usize,
}

fn check_shape(grid: &Grid) -> Result<(), FillError> {
    if grid.nrows() < 1 || grid.ncols() < 2 {
        return Err(FillError::InvalidShape {
            rows: grid.nrows(),
            cols: grid.ncols(),
        });
    }
    Ok(())
}

/// Run the backfill pass in place. Returns the number of cells filled.
pub fn backfill(grid: &mut Grid) -> Result<usize, FillError> {
    check_shape(grid)?;
    let maxi = grid.ncols() - 2;
    let mut filled = 0usize;

    for i in (0..=maxi).rev() {
        for n in 1..grid.nrows() {
            if grid.is_blank(n, i) && !grid.is_blank(n, i + 1) {
                let above = grid[(n - 1, i)].to_string();
                if above.is_empty() {
                    continue;
                }
                trace!("backfill {} <- {:?}", CellRef::new(n, i), above);
                grid.set(n, i, above);
                filled += 1;
            }
        }
    }

    debug!("backfill: {} cells filled", filled);
    Ok(filled)
}

/// Run the compaction pass in place.
pub fn compact(grid: &mut Grid) -> Result<CompactStats, FillError> {
    check_shape(grid)?;
    let overflow = grid.ncols() - 1;
    let mut stats = CompactStats::default();

    for i in 1..=overflow {
        for n in 0..grid.nrows() {
            if grid.is_blank(n, i) && !grid.is_blank(n, i - 1) {
                let value = grid.take(n, i - 1);
                let dest = CellRef::new(n, overflow);
                if !grid.is_blank(n, overflow) {
                    debug!(
                        "compact: {:?} from {} displaces {:?} in {}",
                        value,
                        CellRef::new(n, i - 1),
                        &grid[(n, overflow)],
                        dest
                    );
                    stats.displaced += 1;
                }
                trace!("compact {} -> {} ({:?})", CellRef::new(n, i - 1), dest, value);
                grid.set(n, overflow, value);
                stats.moved += 1;
            }
        }
    }

    debug!(
        "compact: {} moved, {} displaced",
        stats.moved, stats.displaced
    );
    Ok(stats)
}

/// Run both passes on the caller's grid.
pub fn fill_in_place(grid: &mut Grid) -> Result<FillStats, FillError> {
    let backfilled = backfill(grid)?;
    let CompactStats { moved, displaced } = compact(grid)?;
    Ok(FillStats {
        backfilled,
        moved,
        displaced,
    })
}

/// Run both passes on a copy, leaving the input untouched.
pub fn fill(grid: &Grid) -> Result<Grid, FillError> {
    let mut out = grid.clone();
    fill_in_place(&mut out)?;
    Ok(out)
}

/// Repeat [`fill`] until a pass leaves the grid unchanged.
///
/// Returns the stable grid and the number of passes that changed it.
/// Fails once `max_passes` changing passes have run and the grid still
/// changes on the next one.
pub fn fill_until_stable(grid: &Grid, max_passes: usize) -> Result<(Grid, usize), FillError> {
    let mut current = grid.clone();
    let mut passes = 0usize;

    loop {
        let next = fill(&current)?;
        if next == current {
            debug!("fill stable after {} passes", passes);
            return Ok((current, passes));
        }
        if passes == max_passes {
            return Err(FillError::NoFixedPoint { passes });
        }
        passes += 1;
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec())).unwrap()
    }

    #[test]
    fn test_two_by_three_example() {
        let input = grid(&[&["a", "", ""], &["", "b", ""]]);
        let out = fill(&input).unwrap();
        assert_eq!(out, grid(&[&["", "", "a"], &["a", "", "b"]]));
    }

    #[test]
    fn test_fill_leaves_input_untouched() {
        let input = grid(&[&["a", "", ""], &["", "b", ""]]);
        let before = input.clone();
        let _ = fill(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_backfill_only() {
        let mut g = grid(&[&["a", "", ""], &["", "b", ""]]);
        assert_eq!(backfill(&mut g).unwrap(), 1);
        assert_eq!(g, grid(&[&["a", "", ""], &["a", "b", ""]]));
    }

    #[test]
    fn test_backfill_never_writes_row_zero() {
        let mut g = grid(&[&["", "x", ""], &["", "y", ""]]);
        backfill(&mut g).unwrap();
        assert_eq!(g.row(0), grid(&[&["", "x", ""]]).row(0));
    }

    #[test]
    fn test_backfill_chains_down_a_column() {
        // Row 2 sees the value row 1 received earlier in the same column pass.
        let mut g = grid(&[&["p", ""], &["", "x"], &["", "y"]]);
        assert_eq!(backfill(&mut g).unwrap(), 2);
        assert_eq!(g, grid(&[&["p", ""], &["p", "x"], &["p", "y"]]));
    }

    #[test]
    fn test_backfill_sees_fill_from_right_column() {
        // Column 1 is filled first, which then triggers column 0.
        let mut g = grid(&[&["p", "q", ""], &["", "", "z"]]);
        assert_eq!(backfill(&mut g).unwrap(), 2);
        assert_eq!(g, grid(&[&["p", "q", ""], &["p", "q", "z"]]));
    }

    #[test]
    fn test_backfill_blank_above_counts_nothing() {
        let mut g = grid(&[&["", ""], &["", "x"]]);
        assert_eq!(backfill(&mut g).unwrap(), 0);
        assert_eq!(g, grid(&[&["", ""], &["", "x"]]));
    }

    #[test]
    fn test_compact_last_move_wins() {
        let mut g = grid(&[&["a", "", "b", "", ""]]);
        let stats = compact(&mut g).unwrap();
        assert_eq!(stats, CompactStats { moved: 2, displaced: 1 });
        assert_eq!(g, grid(&[&["", "", "", "", "b"]]));
    }

    #[test]
    fn test_compact_displaces_existing_overflow() {
        let mut g = grid(&[&["a", "", "z"]]);
        let stats = compact(&mut g).unwrap();
        assert_eq!(stats, CompactStats { moved: 1, displaced: 1 });
        assert_eq!(g, grid(&[&["", "", "a"]]));
    }

    #[test]
    fn test_compact_into_blank_last_column() {
        let mut g = grid(&[&["x", "y", ""]]);
        let stats = compact(&mut g).unwrap();
        assert_eq!(stats, CompactStats { moved: 1, displaced: 0 });
        assert_eq!(g, grid(&[&["x", "", "y"]]));
    }

    #[test]
    fn test_all_blank_row_stays_blank() {
        let input = grid(&[&["a", "b", "c"], &["", "", ""], &["", "", ""]]);
        let out = fill(&input).unwrap();
        assert!(out.row(1).iter().all(String::is_empty));
        assert!(out.row(2).iter().all(String::is_empty));
    }

    #[test]
    fn test_single_row() {
        let out = fill(&grid(&[&["a", "", "z"]])).unwrap();
        assert_eq!(out, grid(&[&["", "", "a"]]));
    }

    #[test]
    fn test_two_columns() {
        let out = fill(&grid(&[&["a", ""], &["", "b"], &["c", ""]])).unwrap();
        assert_eq!(out, grid(&[&["", "a"], &["a", "b"], &["", "c"]]));
    }

    #[test]
    fn test_fill_in_place_stats() {
        let mut g = grid(&[&["1", "", "3"], &["", "x", ""], &["", "", "y"]]);
        let stats = fill_in_place(&mut g).unwrap();
        assert_eq!(
            g,
            grid(&[&["", "", "1"], &["1", "", "x"], &["1", "x", "y"]])
        );
        assert_eq!(stats.backfilled, 3);
        assert_eq!(stats.moved, 2);
        assert_eq!(stats.displaced, 1);
    }

    #[test]
    fn test_single_column_is_rejected() {
        let err = fill(&grid(&[&["a"], &["b"]])).unwrap_err();
        assert_eq!(err, FillError::InvalidShape { rows: 2, cols: 1 });
    }

    #[test]
    fn test_no_rows_is_rejected() {
        let err = fill(&Grid::new(0, 3)).unwrap_err();
        assert_eq!(err, FillError::InvalidShape { rows: 0, cols: 3 });
    }

    #[test]
    fn test_phases_reject_bad_shape() {
        let mut g = Grid::new(1, 1);
        assert!(backfill(&mut g).is_err());
        assert!(compact(&mut g).is_err());
        assert!(fill_until_stable(&g, 8).is_err());
    }

    fn slow_grid() -> Grid {
        grid(&[
            &["", "z", "z", "", "y"],
            &["x", "y", "x", "y", ""],
            &["z", "", "", "", "z"],
        ])
    }

    #[test]
    fn test_second_pass_is_not_a_fixed_point() {
        let twice = fill(&fill(&slow_grid()).unwrap()).unwrap();
        let thrice = fill(&twice).unwrap();
        assert_eq!(
            twice,
            grid(&[
                &["", "", "", "", "z"],
                &["x", "y", "", "", "x"],
                &["z", "y", "x", "y", "z"],
            ])
        );
        assert_ne!(twice, thrice);
    }

    #[test]
    fn test_fill_until_stable() {
        let (stable, passes) = fill_until_stable(&slow_grid(), 64).unwrap();
        assert_eq!(passes, 4);
        assert_eq!(
            stable,
            grid(&[
                &["", "", "", "", "z"],
                &["", "", "", "", "x"],
                &["z", "y", "x", "y", "z"],
            ])
        );
        assert_eq!(fill(&stable).unwrap(), stable);
    }

    #[test]
    fn test_fill_until_stable_pass_limit() {
        let err = fill_until_stable(&slow_grid(), 3).unwrap_err();
        assert_eq!(err, FillError::NoFixedPoint { passes: 3 });
        assert!(fill_until_stable(&slow_grid(), 4).is_ok());
    }

    #[test]
    fn test_fill_until_stable_zero_passes_on_stable_input() {
        let g = grid(&[&["", "a"], &["", "b"]]);
        assert_eq!(fill_until_stable(&g, 0).unwrap(), (g.clone(), 0));
    }
}
