use std::time::Duration;

use winit::keyboard::KeyCode;

/// Grid dimensions
pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 10;

/// Initial logical window size
pub const WINDOW_WIDTH: u32 = 500;
pub const WINDOW_HEIGHT: u32 = 500;

/// Real-time delay between generations while running
pub const STEP_INTERVAL: Duration = Duration::from_secs(1);

/// Ratio between cursor coordinates and surface pixels.
/// The window reports the cursor in physical pixels, matching the surface.
pub const POINTER_SCALE: u32 = 1;

// ============================================
// Key bindings
// ============================================

/// Leaves editing mode and starts the simulation
pub const RUN_KEY: KeyCode = KeyCode::KeyP;

/// Fills the grid with random cells (editing only)
pub const RANDOMIZE_KEY: KeyCode = KeyCode::KeyR;

/// Kills every cell (editing only)
pub const CLEAR_KEY: KeyCode = KeyCode::KeyC;

/// Probability of a cell being alive after a random fill
pub const RANDOM_FILL_DENSITY: f64 = 0.3;

// ============================================
// Colors (linear RGBA)
// ============================================

pub const BACKGROUND_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const LIVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const HIGHLIGHT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
