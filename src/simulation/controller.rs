use rand::Rng;

use crate::config::RANDOM_FILL_DENSITY;
use crate::simulation::grid::{CellPos, Grid};
use crate::simulation::stepper::step;

/// Raw pointer position as reported by the host, origin top-left
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of one cell on the drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    /// Floor-divide the surface among the grid's cells
    pub fn from_surface(surface_width: u32, surface_height: u32, grid: &Grid) -> Self {
        Self {
            width: surface_width / grid.width().max(1) as u32,
            height: surface_height / grid.height().max(1) as u32,
        }
    }
}

/// Interaction phase of the sandbox
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pointer clicks toggle cells
    #[default]
    Editing,
    /// The grid advances on every tick; terminal
    Running,
}

/// Events the host window delivers to the sandbox.
///
/// Calls that make no sense in the current mode are silent no-ops.
pub trait SandboxInput {
    /// Record the latest pointer position
    fn on_pointer_move(&mut self, pos: PixelPos);

    /// Primary button press; toggles the cell under `pos` while editing
    fn on_pointer_down(&mut self, pos: PixelPos);

    /// Leave editing mode. Returns `true` only on the actual transition,
    /// so the renderer can clear the surface once.
    fn on_run_trigger(&mut self) -> bool;

    /// Advance one generation while running
    fn on_tick(&mut self);
}

/// Owns the grid, the mode and the pointer-to-cell mapping
pub struct Controller {
    grid: Grid,
    mode: Mode,
    cell_size: CellSize,
    pointer_scale: u32,
    pointer: Option<PixelPos>,
    generation: u64,
}

impl Controller {
    /// Create a controller for `grid` drawn on a `surface_width` x `surface_height` surface.
    ///
    /// `pointer_scale` is the ratio between pointer coordinates and surface
    /// pixels (2 on displays that report pointer positions at double density).
    pub fn new(grid: Grid, surface_width: u32, surface_height: u32, pointer_scale: u32) -> Self {
        let cell_size = CellSize::from_surface(surface_width, surface_height, &grid);
        Self {
            grid,
            mode: Mode::Editing,
            cell_size,
            pointer_scale: pointer_scale.max(1),
            pointer: None,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub fn pointer(&self) -> Option<PixelPos> {
        self.pointer
    }

    /// Generations advanced since the simulation started
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Map a pointer position to a grid coordinate.
    ///
    /// The result is not range-checked against the grid; `None` only for
    /// negative positions or a surface too small to hold one cell.
    pub fn cell_from_pixel(&self, pos: PixelPos) -> Option<CellPos> {
        let span_x = self.cell_size.width / self.pointer_scale;
        let span_y = self.cell_size.height / self.pointer_scale;
        if span_x == 0 || span_y == 0 {
            return None;
        }

        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        Some(CellPos::new((x / span_x) as usize, (y / span_y) as usize))
    }

    /// Cell under the pointer, for the edit-mode cursor highlight.
    ///
    /// A pointer sitting on either zero axis counts as not yet placed.
    pub fn highlighted_cell(&self) -> Option<CellPos> {
        if self.mode != Mode::Editing {
            return None;
        }

        let pointer = self.pointer?;
        if pointer.x == 0 || pointer.y == 0 {
            return None;
        }

        self.cell_from_pixel(pointer)
            .filter(|cell| self.grid.contains(cell.col, cell.row))
    }

    /// Replace the grid with a random fill (editing only)
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.mode != Mode::Editing {
            log::debug!("Random fill ignored while running");
            return;
        }
        self.grid = Grid::random(self.grid.width(), self.grid.height(), RANDOM_FILL_DENSITY, rng);
        log::info!("Random fill: {} live cells", self.grid.population());
    }

    /// Kill every cell (editing only)
    pub fn clear(&mut self) {
        if self.mode != Mode::Editing {
            log::debug!("Clear ignored while running");
            return;
        }
        self.grid.clear();
        log::info!("Grid cleared");
    }
}

impl SandboxInput for Controller {
    fn on_pointer_move(&mut self, pos: PixelPos) {
        self.pointer = Some(pos);
    }

    fn on_pointer_down(&mut self, pos: PixelPos) {
        if self.mode != Mode::Editing {
            return;
        }

        let Some(cell) = self.cell_from_pixel(pos) else {
            log::debug!("Click at ({}, {}) maps to no cell", pos.x, pos.y);
            return;
        };

        match self.grid.toggle(cell.col, cell.row) {
            Ok(alive) => log::debug!("Cell ({}, {}) -> {}", cell.col, cell.row, alive),
            Err(e) => log::debug!("Click ignored: {}", e),
        }
    }

    fn on_run_trigger(&mut self) -> bool {
        if self.mode == Mode::Running {
            return false;
        }

        self.mode = Mode::Running;
        log::info!(
            "Simulation started with {} live cells",
            self.grid.population()
        );
        log::debug!("Seed: {:?}", self.grid.live_cells().collect::<Vec<_>>());
        true
    }

    fn on_tick(&mut self) {
        if self.mode != Mode::Running {
            return;
        }

        self.grid = step(&self.grid);
        self.generation += 1;
        log::info!(
            "Generation {}: {} live cells",
            self.generation,
            self.grid.population()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 10x10 grid on a 500x500 surface at double pointer density: 25 pointer px per cell
    fn controller() -> Controller {
        Controller::new(Grid::new(10, 10), 500, 500, 2)
    }

    fn click(ctrl: &mut Controller, col: i32, row: i32) {
        let pos = PixelPos::new(col * 25 + 10, row * 25 + 10);
        ctrl.on_pointer_move(pos);
        ctrl.on_pointer_down(pos);
    }

    #[test]
    fn test_cell_size_floors() {
        let grid = Grid::new(10, 10);
        assert_eq!(
            CellSize::from_surface(505, 499, &grid),
            CellSize {
                width: 50,
                height: 49
            }
        );
    }

    #[test]
    fn test_pointer_mapping_applies_scale() {
        let ctrl = controller();
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(0, 0)), Some(CellPos::new(0, 0)));
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(24, 25)), Some(CellPos::new(0, 1)));
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(249, 249)), Some(CellPos::new(9, 9)));

        let unscaled = Controller::new(Grid::new(10, 10), 500, 500, 1);
        assert_eq!(unscaled.cell_from_pixel(PixelPos::new(249, 249)), Some(CellPos::new(4, 4)));
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let ctrl = Controller::new(Grid::new(10, 10), 500, 500, 0);
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(60, 0)), Some(CellPos::new(1, 0)));
    }

    #[test]
    fn test_negative_pointer_maps_to_nothing() {
        let ctrl = controller();
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(-1, 10)), None);
    }

    #[test]
    fn test_tiny_surface_maps_to_nothing() {
        let ctrl = Controller::new(Grid::new(10, 10), 5, 5, 2);
        assert_eq!(ctrl.cell_size(), CellSize { width: 0, height: 0 });
        assert_eq!(ctrl.cell_from_pixel(PixelPos::new(3, 3)), None);
    }

    #[test]
    fn test_click_toggles_cell() {
        let mut ctrl = controller();
        click(&mut ctrl, 3, 7);
        assert!(ctrl.grid().get(3, 7).unwrap());
        click(&mut ctrl, 3, 7);
        assert!(!ctrl.grid().get(3, 7).unwrap());
    }

    #[test]
    fn test_click_outside_grid_is_ignored() {
        let mut ctrl = controller();
        // Beyond the grid's pointer footprint (250 px at scale 2)
        ctrl.on_pointer_down(PixelPos::new(400, 100));
        ctrl.on_pointer_down(PixelPos::new(-5, -5));
        assert_eq!(ctrl.grid().population(), 0);
        assert_eq!(ctrl.mode(), Mode::Editing);
    }

    #[test]
    fn test_pointer_move_only_records() {
        let mut ctrl = controller();
        ctrl.on_pointer_move(PixelPos::new(30, 40));
        assert_eq!(ctrl.pointer(), Some(PixelPos::new(30, 40)));
        assert_eq!(ctrl.grid().population(), 0);
    }

    #[test]
    fn test_highlight() {
        let mut ctrl = controller();
        assert_eq!(ctrl.highlighted_cell(), None, "No highlight before the pointer moves");

        ctrl.on_pointer_move(PixelPos::new(0, 40));
        assert_eq!(ctrl.highlighted_cell(), None, "Zero axis counts as unplaced");

        ctrl.on_pointer_move(PixelPos::new(60, 40));
        assert_eq!(ctrl.highlighted_cell(), Some(CellPos::new(2, 1)));

        ctrl.on_pointer_move(PixelPos::new(300, 40));
        assert_eq!(ctrl.highlighted_cell(), None, "Off-grid pointer has no highlight");

        ctrl.on_pointer_move(PixelPos::new(60, 40));
        ctrl.on_run_trigger();
        assert_eq!(ctrl.highlighted_cell(), None, "No highlight while running");
    }

    #[test]
    fn test_tick_ignored_while_editing() {
        let mut ctrl = controller();
        click(&mut ctrl, 5, 5);
        ctrl.on_tick();
        assert!(ctrl.grid().get(5, 5).unwrap(), "Lonely cell must survive while editing");
        assert_eq!(ctrl.generation(), 0);
    }

    #[test]
    fn test_clicks_ignored_after_run() {
        let mut ctrl = controller();
        click(&mut ctrl, 1, 1);
        ctrl.on_run_trigger();
        let before = ctrl.grid().clone();
        click(&mut ctrl, 2, 2);
        click(&mut ctrl, 1, 1);
        assert_eq!(ctrl.grid(), &before);
    }

    #[test]
    fn test_run_trigger_is_idempotent() {
        let mut ctrl = controller();
        click(&mut ctrl, 4, 4);
        assert!(ctrl.on_run_trigger());
        let before = ctrl.grid().clone();
        assert!(!ctrl.on_run_trigger(), "Second trigger must not report a transition");
        assert_eq!(ctrl.mode(), Mode::Running);
        assert_eq!(ctrl.grid(), &before);
        assert_eq!(ctrl.generation(), 0);
    }

    #[test]
    fn test_editing_helpers_guarded_by_mode() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ctrl = controller();
        ctrl.randomize(&mut rng);
        ctrl.clear();
        assert_eq!(ctrl.grid().population(), 0);

        click(&mut ctrl, 0, 0);
        ctrl.on_run_trigger();
        ctrl.clear();
        ctrl.randomize(&mut rng);
        assert_eq!(ctrl.grid().live_cells().collect::<Vec<_>>(), vec![CellPos::new(0, 0)]);
    }

    #[test]
    fn test_blinker_end_to_end() {
        let mut ctrl = controller();
        click(&mut ctrl, 4, 4);
        click(&mut ctrl, 4, 5);
        click(&mut ctrl, 4, 6);
        assert!(ctrl.on_run_trigger());

        ctrl.on_tick();
        assert_eq!(
            ctrl.grid().live_cells().collect::<Vec<_>>(),
            vec![CellPos::new(3, 5), CellPos::new(4, 5), CellPos::new(5, 5)]
        );
        assert_eq!(ctrl.generation(), 1);

        ctrl.on_tick();
        assert_eq!(
            ctrl.grid().live_cells().collect::<Vec<_>>(),
            vec![CellPos::new(4, 4), CellPos::new(4, 5), CellPos::new(4, 6)]
        );
    }
}
