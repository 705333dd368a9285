//! Plain-text renderer for terminals and logs

use crate::platform::Renderer;
use crate::sim::Grid;

/// Keeps the latest frame as text and logs it at trace level
#[derive(Debug, Default, Clone)]
pub struct TextRenderer {
    /// Most recent frame
    pub frame: String,
    /// Number of redraws so far
    pub frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TextRenderer {
    fn redraw(&mut self, grid: &Grid) {
        self.frame = grid.to_text();
        self.frames += 1;
        log::trace!("frame {}:\n{}", self.frames, self.frame);
    }
}
