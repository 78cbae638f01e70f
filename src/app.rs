use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{
    CLEAR_KEY, GRID_HEIGHT, GRID_WIDTH, POINTER_SCALE, RANDOMIZE_KEY, RUN_KEY,
    STEP_INTERVAL, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::gpu::{GpuContext, GridBuffers, RenderParams, RenderPipeline};
use crate::simulation::{Controller, Grid, Mode, PixelPos, SandboxInput};

/// Application state: the window and renderer around one sandbox controller
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    grid_buffers: Option<GridBuffers>,
    render_pipeline: Option<RenderPipeline>,
    controller: Option<Controller>,
    tick_timer: TickTimer,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            grid_buffers: None,
            render_pipeline: None,
            controller: None,
            tick_timer: TickTimer::new(STEP_INTERVAL, Instant::now()),
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(buffers), Some(render), Some(controller)) = (
            self.gpu.as_ref(),
            self.grid_buffers.as_ref(),
            self.render_pipeline.as_ref(),
            self.controller.as_ref(),
        ) else {
            return;
        };

        buffers.upload_cells(&gpu.queue, controller.grid());
        let params = RenderParams::new(
            controller.grid(),
            controller.cell_size(),
            controller.highlighted_cell(),
        );
        buffers.update_render_params(&gpu.queue, &params);

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group =
            render.create_bind_group(&gpu.device, &buffers.cells_buffer, &buffers.render_params_buffer);
        render.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&self) {
        if let (Some(window), Some(controller)) = (&self.window, &self.controller) {
            window.set_title(&window_title(controller));
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };

        match key_code {
            key if key == RUN_KEY => {
                if controller.on_run_trigger() {
                    self.tick_timer.restart(Instant::now());
                    self.update_title();
                }
            }
            key if key == RANDOMIZE_KEY => controller.randomize(&mut rand::thread_rng()),
            key if key == CLEAR_KEY => controller.clear(),
            _ => return,
        }

        self.request_redraw();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Initializing life sandbox...");
        log::info!("Grid size: {}x{}", GRID_WIDTH, GRID_HEIGHT);

        let window_attrs = Window::default_attributes()
            .with_title("Life Sandbox")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        // Cell size is fixed from the startup surface; later resizes do not remap the pointer
        let size = window.inner_size();
        log::info!(
            "Surface: {}x{} px at scale factor {:.2}",
            size.width,
            size.height,
            window.scale_factor()
        );
        let controller =
            Controller::new(Grid::new_default(), size.width, size.height, POINTER_SCALE);

        let grid_buffers = GridBuffers::new(&gpu.device, &gpu.queue, controller.grid());
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Click: Toggle cell");
        log::info!("  R: Random fill");
        log::info!("  C: Clear grid");
        log::info!("  P: Start simulation");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.grid_buffers = Some(grid_buffers);
        self.render_pipeline = Some(render_pipeline);
        self.controller = Some(controller);
        self.update_title();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = surface_pixel(position);
                if let Some(controller) = self.controller.as_mut() {
                    controller.on_pointer_move(pos);
                    if controller.mode() == Mode::Editing {
                        self.request_redraw();
                    }
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(controller) = self.controller.as_mut() {
                    if let Some(pos) = controller.pointer() {
                        controller.on_pointer_down(pos);
                        self.request_redraw();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };

        if controller.mode() != Mode::Running {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        if self.tick_timer.due(Instant::now()) {
            controller.on_tick();
            self.update_title();
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.tick_timer.deadline()));
    }
}

/// Fixed-interval generation clock driven by the event loop
struct TickTimer {
    interval: Duration,
    last_tick: Instant,
}

impl TickTimer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    /// Start a fresh interval at `now`
    fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// When the next tick is due
    fn deadline(&self) -> Instant {
        self.last_tick + self.interval
    }

    /// Returns true (and starts the next interval) once the deadline has passed
    fn due(&mut self, now: Instant) -> bool {
        if now >= self.deadline() {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

/// Cursor position in surface pixels.
///
/// winit reports the cursor in physical pixels, the same unit as the surface,
/// so the mapping holds at any display scale factor.
fn surface_pixel(position: PhysicalPosition<f64>) -> PixelPos {
    PixelPos::new(position.x.floor() as i32, position.y.floor() as i32)
}

fn window_title(controller: &Controller) -> String {
    match controller.mode() {
        Mode::Editing => format!(
            "Life Sandbox - Editing - {} live",
            controller.grid().population()
        ),
        Mode::Running => format!(
            "Life Sandbox - Generation {} - {} live",
            controller.generation(),
            controller.grid().population()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::CellPos;

    #[test]
    fn test_tick_timer_waits_full_interval() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::from_secs(1), start);
        assert!(!timer.due(start + Duration::from_millis(999)));
        assert!(timer.due(start + Duration::from_secs(1)));
        assert_eq!(timer.deadline(), start + Duration::from_secs(2));
        assert!(!timer.due(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_tick_timer_restart() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::from_secs(1), start);
        let later = start + Duration::from_secs(5);
        timer.restart(later);
        assert!(!timer.due(later));
        assert_eq!(timer.deadline(), later + Duration::from_secs(1));
    }

    /// Column the shader draws under surface x
    fn rendered_col(controller: &Controller, x: f64) -> usize {
        x as usize / controller.cell_size().width as usize
    }

    #[test]
    fn test_click_matches_rendered_cell_at_fractional_scale() {
        // 500x500 logical window at 125% -> 625x625 surface, 62 px cells
        let mut controller = Controller::new(Grid::new(10, 10), 625, 625, POINTER_SCALE);
        let cursor = PhysicalPosition::new(589.4, 70.0);
        assert_eq!(rendered_col(&controller, cursor.x), 9);

        let pos = surface_pixel(cursor);
        controller.on_pointer_move(pos);
        controller.on_pointer_down(pos);
        assert_eq!(controller.highlighted_cell(), Some(CellPos::new(9, 1)));
        assert!(controller.grid().get(9, 1).unwrap());
    }

    #[test]
    fn test_click_matches_rendered_cell_at_double_scale() {
        // 500x500 logical window at 200% -> 1000x1000 surface
        let controller = Controller::new(Grid::new(10, 10), 1000, 1000, POINTER_SCALE);
        for x in [5.0, 99.9, 100.0, 450.5, 999.0] {
            let cursor = PhysicalPosition::new(x, 10.0);
            let mapped = controller.cell_from_pixel(surface_pixel(cursor)).map(|c| c.col);
            assert_eq!(mapped, Some(rendered_col(&controller, x)), "Mismatch at x={}", x);
        }
    }

    #[test]
    fn test_negative_cursor_maps_to_nothing() {
        let controller = Controller::new(Grid::new(10, 10), 500, 500, POINTER_SCALE);
        let pos = surface_pixel(PhysicalPosition::new(-0.5, 20.0));
        assert_eq!(pos, PixelPos::new(-1, 20));
        assert_eq!(controller.cell_from_pixel(pos), None);
    }

    #[test]
    fn test_window_title_tracks_mode() {
        let mut controller = Controller::new(Grid::new(10, 10), 500, 500, 2);
        assert_eq!(window_title(&controller), "Life Sandbox - Editing - 0 live");
        controller.on_run_trigger();
        controller.on_tick();
        assert_eq!(window_title(&controller), "Life Sandbox - Generation 1 - 0 live");
    }
}
