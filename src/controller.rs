//! Round lifecycle and game rules.
//!
//! The controller owns the `GameState`, the view, a scheduler for the two
//! periodic ticks and the random source used to place moles. Every entry point
//! (`start`, `on_spawn_tick`, `on_timer_tick`, `on_hole_click`) runs to
//! completion synchronously: state is mutated first, then the view is told.
//!
//! Lifecycle: Idle (no ticks) -> Active (both ticks live) -> Idle again once
//! the timer tick sees the clock hit zero, or on `stop`.

use rand::Rng;

use crate::log::clog;
use crate::state::{GameState, HoleId};
use crate::view::View;

/// The two independent periodic sources driving a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    Spawn,
    Timer,
}

/// Repeating timer facility. Handles are owned by the caller and handed back
/// to `cancel`; a handle is never reused after cancellation.
pub trait Scheduler {
    type Handle;
    type Error;

    fn every(&mut self, tick: Tick, period_ms: u32) -> Result<Self::Handle, Self::Error>;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct Controller<V: View, S: Scheduler, R: Rng> {
    state: GameState,
    view: V,
    scheduler: S,
    rng: R,
    spawn_tick: Option<S::Handle>,
    timer_tick: Option<S::Handle>,
}

impl<V: View, S: Scheduler, R: Rng> Controller<V, S, R> {
    /// Wire the pieces together and draw the idle board.
    pub fn new(mut state: GameState, mut view: V, scheduler: S, rng: R) -> Self {
        state.init_holes();
        view.render_board(state.holes());
        view.update_score(state.score());
        view.update_timer(state.timer());
        Self {
            state,
            view,
            scheduler,
            rng,
            spawn_tick: None,
            timer_tick: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Begin a new round, discarding whatever round was running.
    pub fn start(&mut self) -> Result<(), S::Error> {
        self.stop();

        self.state.reset_score();
        self.state.reset_timer();
        self.state.init_holes();
        self.state.set_active(true);

        self.view.update_score(self.state.score());
        self.view.update_timer(self.state.timer());
        self.view.reset_board();

        if let Err(e) = self.schedule_ticks() {
            self.stop();
            return Err(e);
        }
        clog!("round started: {}s on {} holes", self.state.timer(), self.state.holes().len());
        Ok(())
    }

    /// Halt a running round without signalling round over.
    pub fn stop(&mut self) {
        self.state.set_active(false);
        self.halt_ticks();
    }

    pub fn on_tick(&mut self, tick: Tick) {
        match tick {
            Tick::Spawn => self.on_spawn_tick(),
            Tick::Timer => self.on_timer_tick(),
        }
    }

    pub fn on_spawn_tick(&mut self) {
        if !self.state.is_active() || !self.state.can_add_mole() {
            return;
        }
        if let Some(id) = self.state.random_empty_hole(&mut self.rng) {
            if self.state.add_mole(id) {
                self.view.update_hole(id, true);
            }
        }
    }

    pub fn on_timer_tick(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let left = self.state.decrement_timer();
        self.view.update_timer(left);
        if self.state.is_game_over() {
            self.end_round();
        }
    }

    /// A click on hole `id`. Ids off the board are ignored.
    pub fn on_hole_click(&mut self, id: HoleId) {
        clog!("hole clicked: {id}, active: {}", self.state.is_active());
        if !self.state.is_active() || !self.state.has_mole(id) {
            return;
        }
        self.state.remove_mole(id);
        self.view.update_hole(id, false);
        self.state.increment_score();
        self.view.update_score(self.state.score());
    }

    fn end_round(&mut self) {
        self.state.set_active(false);
        self.halt_ticks();
        clog!("round over, score {}", self.state.score());
        self.view.notify_round_over(self.state.score());
    }

    fn schedule_ticks(&mut self) -> Result<(), S::Error> {
        let period = self.state.config().tick_interval_ms;
        // Spawn tick first: ticks due at the same moment fire in registration order.
        self.spawn_tick = Some(self.scheduler.every(Tick::Spawn, period)?);
        self.timer_tick = Some(self.scheduler.every(Tick::Timer, period)?);
        Ok(())
    }

    fn halt_ticks(&mut self) {
        if let Some(h) = self.spawn_tick.take() {
            self.scheduler.cancel(h);
        }
        if let Some(h) = self.timer_tick.take() {
            self.scheduler.cancel(h);
        }
    }
}

impl<V: View, S: Scheduler, R: Rng> Drop for Controller<V, S, R> {
    fn drop(&mut self) {
        self.halt_ticks();
    }
}
