//! Stacker - a timing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, platform motion, row settling, session)
//! - `config`: Board size and per-row speed/size schedule
//! - `platform`: Capability interfaces and the driver that wires them to a session
//! - `renderer`: WebGPU grid renderer and a plain-text renderer

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, RowSpec, Schedule};
pub use platform::{Driver, InputSource, Notifier, Renderer, Scheduler};
pub use sim::{GameEvent, GamePhase, Grid, Session};

/// Game configuration constants
pub mod consts {
    /// Board width in cells
    pub const GRID_WIDTH: usize = 7;
    /// Board height in rows
    pub const GRID_HEIGHT: usize = 11;

    /// Cell pitch in layout units (cell size plus gap)
    pub const CELL_PITCH: f32 = 1.0;
    /// Gap between neighbouring cells, in layout units
    pub const CELL_GAP: f32 = 0.12;
}
