//! Shape generation for the board
//!
//! Layout units: one cell pitch per cell, board centred on the origin, +y up.
//! Row 0 is drawn at the top.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{CELL_GAP, CELL_PITCH};
use crate::sim::Grid;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Size of the whole board in layout units
pub fn board_extent(grid: &Grid) -> Vec2 {
    Vec2::new(grid.width() as f32, grid.height() as f32) * CELL_PITCH
}

/// Bottom-left and top-right corners of a cell, gap removed
pub fn cell_bounds(grid: &Grid, row: usize, col: usize) -> (Vec2, Vec2) {
    let half = board_extent(grid) / 2.0;
    let left = col as f32 * CELL_PITCH - half.x;
    let top = half.y - row as f32 * CELL_PITCH;
    let inset = CELL_GAP / 2.0;
    (
        Vec2::new(left + inset, top - CELL_PITCH + inset),
        Vec2::new(left + CELL_PITCH - inset, top - inset),
    )
}

/// Generate vertices for every cell of the grid
pub fn grid_cells(grid: &Grid) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(grid.width() * grid.height() * 6);
    let active = grid.active_row();

    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let color = if cell.is_occupied() {
                colors::CELL_OCCUPIED
            } else if active == Some(row) {
                colors::CELL_ACTIVE_ROW
            } else {
                colors::CELL_EMPTY
            };
            let (min, max) = cell_bounds(grid, row, col);
            vertices.extend_from_slice(&rect(min, max, color));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cells_vertex_count() {
        let grid = Grid::new(7, 11);
        assert_eq!(grid_cells(&grid).len(), 7 * 11 * 6);
    }

    #[test]
    fn test_top_left_cell_is_top_left() {
        let grid = Grid::new(4, 2);
        let (min, max) = cell_bounds(&grid, 0, 0);
        assert!(min.x < 0.0 && min.y > 0.0);
        assert!(max.x <= -1.0 + 0.001);
        assert!(max.y <= 1.0);
    }

    #[test]
    fn test_occupied_cells_colored() {
        let mut grid = Grid::new(3, 1);
        grid.move_platform(1, 1);
        let vertices = grid_cells(&grid);
        assert_eq!(vertices[0].color, colors::CELL_ACTIVE_ROW);
        assert_eq!(vertices[6].color, colors::CELL_OCCUPIED);
    }
}
