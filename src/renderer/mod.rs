//! Board rendering
//!
//! `pipeline` draws the grid as colored quads through WebGPU; `text` renders
//! it as ASCII for the native binary.

pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use text::TextRenderer;
