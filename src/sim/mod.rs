//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One motion step per timer tick, no wall-clock reads
//! - Side effects are returned as `GameEvent`s, never performed
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod motion;
pub mod session;

pub use collision::{is_supported, settle_row};
pub use grid::{Cell, Grid};
pub use motion::{Direction, PlatformState, Tick, tick};
pub use session::{GameEvent, GamePhase, Session};
