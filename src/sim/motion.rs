//! Platform motion
//!
//! The moving platform sweeps the active row back and forth, one column per
//! tick. `tick` is pure: it takes the current state and returns the next one
//! along with the column the platform occupies this step. Driving it
//! periodically is the scheduler's job.

use serde::{Deserialize, Serialize};

/// Direction of travel along the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Moving right
    #[default]
    Advancing,
    /// Moving left
    Reversing,
}

/// Position and heading of the live platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformState {
    /// Leftmost column the platform will occupy on the next tick
    pub position: usize,
    /// Platform width in cells
    pub size: usize,
    pub direction: Direction,
}

impl PlatformState {
    /// A fresh platform at the left edge, moving right
    pub fn new(size: usize) -> Self {
        Self {
            position: 0,
            size,
            direction: Direction::Advancing,
        }
    }
}

/// Outcome of one motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Leftmost column to draw this step
    pub drawn_at: usize,
    /// State for the following step
    pub next: PlatformState,
}

/// Advance the platform by one step on a row `width` cells wide.
///
/// The heading flips when the platform sits on the boundary it is heading
/// toward, then the platform is drawn, then it moves one column. A platform
/// as wide as the row has nowhere to go and stays at column 0.
pub fn tick(state: PlatformState, width: usize) -> Tick {
    let last = width.saturating_sub(state.size);
    let mut direction = state.direction;

    if state.position == last && direction == Direction::Advancing {
        direction = Direction::Reversing;
    }
    if state.position == 0 && direction == Direction::Reversing {
        direction = Direction::Advancing;
    }

    let drawn_at = state.position;
    let position = match direction {
        Direction::Advancing => (drawn_at + 1).min(last),
        Direction::Reversing => drawn_at.saturating_sub(1),
    };

    Tick {
        drawn_at,
        next: PlatformState {
            position,
            direction,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(width: usize, size: usize, ticks: usize) -> Vec<usize> {
        let mut state = PlatformState::new(size);
        let mut drawn = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            let step = tick(state, width);
            drawn.push(step.drawn_at);
            state = step.next;
        }
        drawn
    }

    #[test]
    fn test_sweep_pattern() {
        assert_eq!(run(7, 3, 12), vec![0, 1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3]);
    }

    #[test]
    fn test_reverses_at_right_bound() {
        let state = PlatformState {
            position: 4,
            size: 3,
            direction: Direction::Advancing,
        };
        let step = tick(state, 7);
        assert_eq!(step.drawn_at, 4);
        assert_eq!(step.next.position, 3);
        assert_eq!(step.next.direction, Direction::Reversing);
    }

    #[test]
    fn test_advances_again_at_left_bound() {
        let state = PlatformState {
            position: 0,
            size: 2,
            direction: Direction::Reversing,
        };
        let step = tick(state, 7);
        assert_eq!(step.drawn_at, 0);
        assert_eq!(step.next.position, 1);
        assert_eq!(step.next.direction, Direction::Advancing);
    }

    #[test]
    fn test_full_width_platform_stays_put() {
        assert_eq!(run(3, 3, 5), vec![0; 5]);
    }

    #[test]
    fn test_single_cell_on_two_columns() {
        assert_eq!(run(2, 1, 6), vec![0, 1, 0, 1, 0, 1]);
    }
}
