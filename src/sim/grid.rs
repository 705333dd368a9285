//! Occupancy grid
//!
//! Row 0 is the top of the board. Play starts on the bottom row and the
//! active row counts upward (toward 0); clearing row 0 leaves no active row,
//! which is a win.

use serde::{Deserialize, Serialize};

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied,
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        self == Cell::Occupied
    }
}

/// The stack of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row currently being played; `None` once the top row has been cleared
    active_row: Option<usize>,
    /// Row-major cells, `height * width`
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the bottom row active
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            active_row: height.checked_sub(1),
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn active_row(&self) -> Option<usize> {
        self.active_row
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_occupied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.index(row, col);
        self.cells[i] = cell;
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterator over rows, top first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn occupied_in_row(&self, row: usize) -> usize {
        self.row(row).iter().filter(|c| c.is_occupied()).count()
    }

    /// Move the active row up by one. Returns the new active row.
    pub(crate) fn step_up(&mut self) -> Option<usize> {
        self.active_row = self.active_row.and_then(|r| r.checked_sub(1));
        self.active_row
    }

    /// Draw the platform on the active row.
    ///
    /// Columns `[left_col, left_col + size)` become occupied and the rest of
    /// the row is emptied. The right edge is clamped to the grid width.
    pub fn move_platform(&mut self, left_col: usize, size: usize) {
        let Some(row) = self.active_row else {
            return;
        };
        let right_edge = left_col.saturating_add(size).min(self.width);
        for col in 0..self.width {
            let cell = if col >= left_col && col < right_edge {
                Cell::Occupied
            } else {
                Cell::Empty
            };
            self.set(row, col, cell);
        }
    }

    /// Render as text: one line per row, `#` occupied, `.` empty
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|c| if c.is_occupied() { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(7, 11);
        assert_eq!(grid.active_row(), Some(10));
        assert_eq!(grid.rows().count(), 11);
        assert!(grid.rows().all(|r| r.iter().all(|c| *c == Cell::Empty)));
    }

    #[test]
    fn test_move_platform_sets_run() {
        let mut grid = Grid::new(7, 2);
        grid.move_platform(2, 3);
        assert_eq!(grid.to_text(), ".......\n..###..\n");
    }

    #[test]
    fn test_move_platform_clears_rest_of_row() {
        let mut grid = Grid::new(5, 1);
        grid.move_platform(0, 2);
        grid.move_platform(3, 2);
        assert_eq!(grid.to_text(), "...##\n");
    }

    #[test]
    fn test_move_platform_clamps_right_edge() {
        let mut grid = Grid::new(5, 1);
        grid.move_platform(4, 3);
        assert_eq!(grid.to_text(), "....#\n");
        assert_eq!(grid.occupied_in_row(0), 1);
    }

    #[test]
    fn test_move_platform_without_active_row() {
        let mut grid = Grid::new(3, 1);
        assert_eq!(grid.step_up(), None);
        grid.move_platform(0, 3);
        assert_eq!(grid.to_text(), "...\n");
    }

    #[test]
    fn test_step_up() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(grid.step_up(), Some(0));
        assert_eq!(grid.step_up(), None);
        assert_eq!(grid.step_up(), None);
    }
}
