use rand::Rng;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::error::GridError;

/// Grid-space coordinate of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

impl CellPos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Fixed-size boolean matrix of cell liveness.
///
/// Cloning produces an independent snapshot, so a stepper can read the
/// previous generation while building the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major liveness, `true` = alive
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid with the configured dimensions
    pub fn new_default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }

    /// Create a grid whose cell at `(col, row)` is `alive(col, row)`, filled row by row
    pub fn from_fn(width: usize, height: usize, mut alive: impl FnMut(usize, usize) -> bool) -> Self {
        let cells = (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .map(|(col, row)| alive(col, row))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a grid where each cell is alive with probability `density`
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        Self::from_fn(width, height, |_, _| rng.gen_bool(density))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(col, row)` lies inside the grid
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    fn index(&self, col: usize, row: usize) -> Result<usize, GridError> {
        if self.contains(col, row) {
            Ok(row * self.width + col)
        } else {
            Err(GridError::OutOfRange {
                col,
                row,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Result<bool, GridError> {
        let idx = self.index(col, row)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, col: usize, row: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(col, row)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a cell's liveness, returning its new state
    pub fn toggle(&mut self, col: usize, row: usize) -> Result<bool, GridError> {
        let alive = !self.get(col, row)?;
        self.set(col, row, alive)?;
        Ok(alive)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(idx, _)| CellPos::new(idx % self.width, idx / self.width))
    }

    /// Liveness of every cell in row-major order
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}
