mod buffers;
mod context;
mod render;

pub use buffers::{GridBuffers, RenderParams};
pub use context::GpuContext;
pub use render::RenderPipeline;
