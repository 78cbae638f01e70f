use crate::simulation::grid::Grid;
use crate::simulation::neighbors::count_live_neighbors;

/// Liveness of a cell in the next generation (B3/S23).
///
/// * A live cell with fewer than two live neighbors dies
/// * A live cell with two or three live neighbors lives on
/// * A live cell with more than three live neighbors dies
/// * A dead cell with exactly three live neighbors becomes alive
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Advance `grid` by one generation.
///
/// Every cell is evaluated against the untouched input; the result is a new grid.
pub fn step(grid: &Grid) -> Grid {
    let cells = grid.cells();
    let width = grid.width();
    Grid::from_fn(width, grid.height(), |col, row| {
        next_state(cells[row * width + col], count_live_neighbors(grid, col, row))
    })
}
