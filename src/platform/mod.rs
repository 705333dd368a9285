//! Platform abstraction layer
//!
//! The simulation only knows about four capabilities:
//! - `Renderer`: draws the grid
//! - `InputSource`: delivers stop triggers and can be switched off
//! - `Scheduler`: the single periodic timer
//! - `Notifier`: announces the outcome
//!
//! `Driver` owns a `Session` plus one of each and turns the session's events
//! into calls on them.

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;

use std::cell::RefCell;
use std::rc::Weak;

use crate::sim::{GameEvent, Grid, Session};

/// Draws the board
pub trait Renderer {
    fn redraw(&mut self, grid: &Grid);
}

/// A renderer that may have failed to initialise draws nothing
impl<R: Renderer> Renderer for Option<R> {
    fn redraw(&mut self, grid: &Grid) {
        if let Some(renderer) = self {
            renderer.redraw(grid);
        }
    }
}

/// Source of stop triggers
pub trait InputSource {
    /// Start delivering triggers
    fn attach(&mut self);
    /// Stop delivering triggers
    fn detach(&mut self);
}

/// The periodic timer driving platform motion
///
/// At most one timer is live. `cancel` with nothing running is a no-op.
pub trait Scheduler {
    fn start(&mut self, period_ms: u32);
    fn cancel(&mut self);
}

/// End-of-game announcements
pub trait Notifier {
    fn on_win(&mut self);
    fn on_loss(&mut self);
}

/// Wires a session to its collaborators
pub struct Driver<R, I, S, N> {
    session: Session,
    pub renderer: R,
    pub input: I,
    pub scheduler: S,
    pub notifier: N,
}

impl<R, I, S, N> Driver<R, I, S, N>
where
    R: Renderer,
    I: InputSource,
    S: Scheduler,
    N: Notifier,
{
    pub fn new(session: Session, renderer: R, input: I, scheduler: S, notifier: N) -> Self {
        Self {
            session,
            renderer,
            input,
            scheduler,
            notifier,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Attach input, draw the empty board and start the first row's timer
    pub fn start(&mut self) {
        if self.session.is_over() {
            return;
        }
        self.input.attach();
        self.renderer.redraw(self.session.grid());
        let events = self.session.start();
        self.dispatch(&events);
    }

    /// Timer callback
    pub fn tick(&mut self) {
        let events = self.session.tick();
        self.dispatch(&events);
    }

    /// Input callback
    pub fn stop_trigger(&mut self) {
        let events = self.session.stop_trigger();
        self.dispatch(&events);
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Redraw => self.renderer.redraw(self.session.grid()),
                GameEvent::TimerStarted { row, period_ms } => {
                    log::debug!("row {} timer every {} ms", row, period_ms);
                    self.scheduler.start(period_ms);
                }
                GameEvent::TimerCancelled => self.scheduler.cancel(),
                GameEvent::RowSettled { .. } => {}
                GameEvent::Won => self.notifier.on_win(),
                GameEvent::Lost => self.notifier.on_loss(),
                GameEvent::InputDetached => self.input.detach(),
            }
        }
    }
}

/// Run `op` on a shared driver from a host callback.
///
/// The call is dropped when the driver is gone or already borrowed (a trigger
/// arriving while another one is being handled). Returns whether `op` ran.
pub fn try_with_driver<R, I, S, N>(
    handle: &Weak<RefCell<Driver<R, I, S, N>>>,
    op: impl FnOnce(&mut Driver<R, I, S, N>),
) -> bool {
    let Some(driver) = handle.upgrade() else {
        return false;
    };
    match driver.try_borrow_mut() {
        Ok(mut driver) => {
            op(&mut *driver);
            true
        }
        Err(_) => {
            log::debug!("driver busy, callback dropped");
            false
        }
    }
}
