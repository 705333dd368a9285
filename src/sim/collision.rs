//! Row support checks
//!
//! After a drop, every occupied cell of the dropped row must rest on an
//! occupied cell in the row beneath it (higher row index). Unsupported cells
//! fall away.

use super::grid::{Cell, Grid};

/// Whether the cell at (`row`, `col`) rests on something.
///
/// The bottom row rests on the floor.
pub fn is_supported(grid: &Grid, row: usize, col: usize) -> bool {
    row + 1 == grid.height() || grid.is_occupied(row + 1, col)
}

/// Clear unsupported cells of `row` and report whether play can continue.
///
/// The bottom row always continues. Any other row continues only if at least
/// one of its occupied cells survived.
pub fn settle_row(grid: &mut Grid, row: usize) -> bool {
    if row + 1 == grid.height() {
        return true;
    }

    let mut can_continue = false;
    for col in 0..grid.width() {
        if !grid.is_occupied(row, col) {
            continue;
        }
        if is_supported(grid, row, col) {
            can_continue = true;
        } else {
            grid.set(row, col, Cell::Empty);
        }
    }
    can_continue
}
