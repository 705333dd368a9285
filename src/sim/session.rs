//! Game session
//!
//! The session owns every piece of game state: the grid, the validated
//! configuration, the live platform and the phase. It never talks to the
//! outside world directly; each operation returns the `GameEvent`s the host
//! has to act on (redraw, start/cancel the timer, notify, detach input).

use serde::{Deserialize, Serialize};

use super::collision::settle_row;
use super::grid::Grid;
use super::motion::{self, PlatformState};
use crate::config::{ConfigError, GameConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// A platform is (or is about to be) moving on the active row
    #[default]
    Playing,
    /// The top row was cleared
    Won,
    /// A drop missed the row beneath entirely
    Lost,
}

/// Side effects requested by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Grid contents changed
    Redraw,
    /// Start the periodic timer for a row
    TimerStarted { row: usize, period_ms: u32 },
    /// Stop the periodic timer
    TimerCancelled,
    /// A dropped row was checked; `kept` cells survived
    RowSettled { row: usize, kept: usize },
    Won,
    Lost,
    /// No further stop triggers will be accepted
    InputDetached,
}

/// One play-through of the board
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    grid: Grid,
    /// Live platform; present exactly while a timer should be running
    platform: Option<PlatformState>,
    phase: GamePhase,
    started: bool,
}

impl Session {
    /// Create a session, rejecting a configuration with missing or unusable rows
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self {
            config,
            grid,
            platform: None,
            phase: GamePhase::Playing,
            started: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn platform(&self) -> Option<&PlatformState> {
        self.platform.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Spawn the first platform. Does nothing on a second call.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.started {
            return Vec::new();
        }
        let Some(row) = self.grid.active_row() else {
            return Vec::new();
        };
        self.started = true;
        vec![self.spawn_platform(row)]
    }

    /// One timer step: move the platform and draw it.
    ///
    /// A tick arriving with no live platform (a timer firing after it was
    /// cancelled) is ignored.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let Some(state) = self.platform else {
            log::trace!("tick with no live platform ignored");
            return Vec::new();
        };
        let step = motion::tick(state, self.grid.width());
        self.grid.move_platform(step.drawn_at, state.size);
        self.platform = Some(step.next);
        log::trace!("platform drawn at column {}", step.drawn_at);
        vec![GameEvent::Redraw]
    }

    /// Handle the player's drop.
    ///
    /// Cancels the timer, moves the active row up, then settles the row that
    /// was just vacated against the row beneath it. Ends the game on a miss or
    /// after the top row; otherwise starts the next row's platform.
    pub fn stop_trigger(&mut self) -> Vec<GameEvent> {
        if self.is_over() {
            log::debug!("stop trigger after game end ignored");
            return Vec::new();
        }
        if !self.started {
            log::debug!("stop trigger before start ignored");
            return Vec::new();
        }

        let mut events = Vec::with_capacity(5);
        if self.platform.take().is_some() {
            events.push(GameEvent::TimerCancelled);
        }

        let Some(vacated) = self.grid.active_row() else {
            return events;
        };
        // The active row moves first; the check runs on the row it left.
        let active = self.grid.step_up();
        let can_continue = settle_row(&mut self.grid, vacated);
        let kept = self.grid.occupied_in_row(vacated);
        events.push(GameEvent::RowSettled { row: vacated, kept });
        events.push(GameEvent::Redraw);

        if !can_continue {
            log::info!("row {} missed the stack, game lost", vacated);
            self.phase = GamePhase::Lost;
            events.push(GameEvent::Lost);
            events.push(GameEvent::InputDetached);
            return events;
        }

        match active {
            None => {
                log::info!("top row reached, game won");
                self.phase = GamePhase::Won;
                events.push(GameEvent::Won);
                events.push(GameEvent::InputDetached);
            }
            Some(row) => {
                log::info!("row {} settled with {} cells, advancing to row {}", vacated, kept, row);
                events.push(self.spawn_platform(row));
            }
        }
        events
    }

    fn spawn_platform(&mut self, row: usize) -> GameEvent {
        let spec = self.config.row_spec(row);
        self.platform = Some(PlatformState::new(spec.size));
        GameEvent::TimerStarted {
            row,
            period_ms: spec.period_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RowSpec, Schedule};

    fn config(width: usize, rows: &[(usize, u32)]) -> GameConfig {
        GameConfig {
            width,
            height: rows.len(),
            schedule: Schedule::new(rows.iter().map(|&(s, p)| RowSpec::new(s, p)).collect()),
        }
    }

    fn ticks(session: &mut Session, n: usize) {
        for _ in 0..n {
            session.tick();
        }
    }

    #[test]
    fn test_start_spawns_bottom_platform() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        assert_eq!(
            session.start(),
            vec![GameEvent::TimerStarted { row: 10, period_ms: 500 }]
        );
        assert_eq!(session.platform().map(|p| p.size), Some(3));
        // A second start must not spawn a second timer
        assert!(session.start().is_empty());
    }

    #[test]
    fn test_stop_before_start_is_ignored() {
        let mut session = Session::new(config(5, &[(2, 100), (2, 60)])).unwrap();
        assert!(session.stop_trigger().is_empty());
        assert_eq!(session.grid().active_row(), Some(1));
        assert_eq!(session.grid().to_text(), ".....\n.....\n");
        assert_eq!(
            session.start(),
            vec![GameEvent::TimerStarted { row: 1, period_ms: 100 }]
        );
    }

    #[test]
    fn test_tick_draws_platform() {
        let mut session = Session::new(config(5, &[(2, 100)])).unwrap();
        session.start();
        assert_eq!(session.tick(), vec![GameEvent::Redraw]);
        assert_eq!(session.grid().to_text(), "##...\n");
        ticks(&mut session, 2);
        assert_eq!(session.grid().to_text(), "..##.\n");
    }

    #[test]
    fn test_tick_without_platform_is_ignored() {
        let mut session = Session::new(config(5, &[(2, 100)])).unwrap();
        assert!(session.tick().is_empty());
    }

    #[test]
    fn test_single_row_win() {
        let mut session = Session::new(config(4, &[(2, 100)])).unwrap();
        session.start();
        session.tick();
        let events = session.stop_trigger();
        assert_eq!(
            events,
            vec![
                GameEvent::TimerCancelled,
                GameEvent::RowSettled { row: 0, kept: 2 },
                GameEvent::Redraw,
                GameEvent::Won,
                GameEvent::InputDetached,
            ]
        );
        assert_eq!(session.phase(), GamePhase::Won);
        assert!(session.platform().is_none());
    }

    #[test]
    fn test_advance_starts_next_row() {
        let mut session = Session::new(config(5, &[(3, 200), (2, 90)])).unwrap();
        session.start();
        session.tick();
        let events = session.stop_trigger();
        assert_eq!(
            events.last(),
            Some(&GameEvent::TimerStarted { row: 0, period_ms: 90 })
        );
        assert_eq!(session.grid().active_row(), Some(0));
        assert_eq!(session.platform().map(|p| (p.position, p.size)), Some((0, 2)));
    }

    #[test]
    fn test_miss_loses() {
        // Bottom platform at columns 0..2, top platform swept to columns 4..6
        let mut session = Session::new(config(6, &[(2, 100), (2, 100)])).unwrap();
        session.start();
        session.tick();
        session.stop_trigger();
        ticks(&mut session, 5);
        assert_eq!(session.grid().to_text(), "....##\n##....\n");

        let events = session.stop_trigger();
        assert!(events.contains(&GameEvent::Lost));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TimerStarted { .. })));
        assert_eq!(session.phase(), GamePhase::Lost);
        assert_eq!(session.grid().occupied_in_row(0), 0);
    }

    #[test]
    fn test_partial_overlap_continues() {
        let mut session = Session::new(config(6, &[(3, 100), (3, 100), (1, 100)])).unwrap();
        session.start();
        session.tick();
        session.stop_trigger();
        ticks(&mut session, 3);
        assert_eq!(session.grid().to_text(), "......\n..###.\n###...\n");

        let events = session.stop_trigger();
        assert!(events.contains(&GameEvent::RowSettled { row: 1, kept: 1 }));
        assert_eq!(session.grid().to_text(), "......\n..#...\n###...\n");
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_stop_after_end_is_noop() {
        let mut session = Session::new(config(3, &[(1, 100)])).unwrap();
        session.start();
        session.tick();
        session.stop_trigger();
        assert!(session.stop_trigger().is_empty());
        assert!(session.tick().is_empty());
        assert_eq!(session.phase(), GamePhase::Won);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let bad = GameConfig {
            width: 7,
            height: 4,
            schedule: Schedule::default(),
        };
        assert!(Session::new(bad).is_err());
    }
}
