use crate::simulation::grid::Grid;

/// Offsets of the 8-cell Moore neighborhood
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Count the live cells around `(col, row)`.
///
/// The grid does not wrap: neighbors past an edge are always dead.
pub fn count_live_neighbors(grid: &Grid, col: usize, row: usize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dc, dr)| Some((col.checked_add_signed(dc)?, row.checked_add_signed(dr)?)))
        .filter(|&(c, r)| grid.get(c, r).unwrap_or(false))
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_grid(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        for row in 0..height {
            for col in 0..width {
                grid.set(col, row, true).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_interior_all_alive() {
        let grid = full_grid(5, 5);
        assert_eq!(count_live_neighbors(&grid, 2, 2), 8);
    }

    #[test]
    fn test_interior_all_dead() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, true).unwrap();
        assert_eq!(count_live_neighbors(&grid, 2, 2), 0, "A cell never counts itself");
    }

    #[test]
    fn test_corner_does_not_wrap() {
        let grid = full_grid(10, 10);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_live_neighbors(&grid, 9, 9), 3);
        assert_eq!(count_live_neighbors(&grid, 9, 0), 3);
    }

    #[test]
    fn test_edge_does_not_wrap() {
        let grid = full_grid(10, 10);
        assert_eq!(count_live_neighbors(&grid, 0, 5), 5);
        assert_eq!(count_live_neighbors(&grid, 5, 9), 5);
    }

    #[test]
    fn test_opposite_edge_is_invisible() {
        let mut grid = Grid::new(10, 10);
        grid.set(9, 0, true).unwrap();
        grid.set(0, 9, true).unwrap();
        grid.set(9, 9, true).unwrap();
        assert_eq!(count_live_neighbors(&grid, 0, 0), 0);
    }
}
