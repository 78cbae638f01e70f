//! Life Sandbox
//!
//! Paint cells on a small grid, then press P to watch it evolve under
//! Conway's rules, one generation per second.

mod app;
mod config;
mod error;
mod gpu;
mod simulation;

use winit::event_loop::EventLoop;

use crate::app::App;

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)
}
