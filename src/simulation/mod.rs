mod controller;
mod grid;
mod neighbors;
mod stepper;

pub use controller::{CellSize, Controller, Mode, PixelPos, SandboxInput};
pub use grid::{CellPos, Grid};
