use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::config::{BACKGROUND_COLOR, HIGHLIGHT_COLOR, LIVE_COLOR};
use crate::simulation::{CellPos, CellSize, Grid};

/// Marker for "no highlighted cell"
const NO_HIGHLIGHT: i32 = -1;

/// Storage buffer mirroring the grid plus the render uniform
pub struct GridBuffers {
    /// One u32 per cell, row-major, 1 = alive
    pub cells_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub render_params_buffer: Buffer,
    /// Grid dimensions
    pub width: u32,
    pub height: u32,
}

/// Render parameters passed to the fragment shader (80 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Grid layout (16 bytes)
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,

    // Cursor (16 bytes)
    pub highlight_col: i32,
    pub highlight_row: i32,
    pub show_highlight: u32,
    pub _padding: u32,

    // Colors (48 bytes)
    pub background: [f32; 4],
    pub live: [f32; 4],
    pub highlight: [f32; 4],
}

impl RenderParams {
    /// Build parameters for one frame
    pub fn new(grid: &Grid, cell_size: CellSize, highlight: Option<CellPos>) -> Self {
        let (highlight_col, highlight_row) = match highlight {
            Some(cell) => (cell.col as i32, cell.row as i32),
            None => (NO_HIGHLIGHT, NO_HIGHLIGHT),
        };

        Self {
            grid_width: grid.width() as u32,
            grid_height: grid.height() as u32,
            cell_width: cell_size.width,
            cell_height: cell_size.height,
            highlight_col,
            highlight_row,
            show_highlight: highlight.is_some() as u32,
            _padding: 0,
            background: BACKGROUND_COLOR,
            live: LIVE_COLOR,
            highlight: HIGHLIGHT_COLOR,
        }
    }
}

/// Pack grid liveness into the layout the shader reads
pub fn pack_cells(grid: &Grid) -> Vec<u32> {
    grid.cells().iter().map(|&alive| alive as u32).collect()
}

impl GridBuffers {
    /// Create grid buffers and upload the initial state
    pub fn new(device: &Device, queue: &Queue, grid: &Grid) -> Self {
        let width = grid.width() as u32;
        let height = grid.height() as u32;
        let cell_count = (width * height).max(1);

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid-cells-buffer"),
            size: (cell_count as usize * std::mem::size_of::<u32>()) as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = Self {
            cells_buffer,
            render_params_buffer,
            width,
            height,
        };
        buffers.upload_cells(queue, grid);
        buffers
    }

    /// Copy the grid's current liveness to the GPU
    pub fn upload_cells(&self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!(grid.width() as u32, self.width, "Grid width mismatch");
        debug_assert_eq!(grid.height() as u32, self.height, "Grid height mismatch");
        let cells = pack_cells(grid);
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&cells));
    }

    /// Update render parameters
    pub fn update_render_params(&self, queue: &Queue, params: &RenderParams) {
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        assert_eq!(std::mem::size_of::<RenderParams>(), 80);
    }

    #[test]
    fn test_pack_cells_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 0, true).unwrap();
        grid.set(0, 1, true).unwrap();
        assert_eq!(pack_cells(&grid), vec![0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_render_params_highlight() {
        let grid = Grid::new(10, 10);
        let size = CellSize {
            width: 50,
            height: 50,
        };

        let params = RenderParams::new(&grid, size, Some(CellPos::new(3, 4)));
        assert_eq!((params.highlight_col, params.highlight_row), (3, 4));
        assert_eq!(params.show_highlight, 1);

        let params = RenderParams::new(&grid, size, None);
        assert_eq!((params.highlight_col, params.highlight_row), (NO_HIGHLIGHT, NO_HIGHLIGHT));
        assert_eq!(params.show_highlight, 0);
        assert_eq!(params.grid_width, 10);
        assert_eq!(params.cell_width, 50);
    }
}
