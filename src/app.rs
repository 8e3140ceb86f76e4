//! Composition root for the browser build.
//!
//! `Game` owns the single controller instance. Interval and input callbacks
//! only hold a `Weak` to it, so once JS drops the `Game` handle every callback
//! becomes inert and the controller's drop clears the live intervals.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::controller::Controller;
use crate::dom::{DomView, IntervalScheduler};
use crate::log::clog;
use crate::state::{GameConfig, GameState};

type WebController = Controller<DomView, IntervalScheduler, SmallRng>;

#[wasm_bindgen]
pub struct Game {
    app: Rc<RefCell<WebController>>,
}

#[wasm_bindgen]
impl Game {
    /// Same as pressing the start button: (re)start a round.
    pub fn start_round(&self) -> Result<(), JsValue> {
        self.app.borrow_mut().start()
    }

    pub fn stop(&self) {
        self.app.borrow_mut().stop();
    }

    pub fn score(&self) -> u32 {
        self.app.borrow().state().score()
    }

    pub fn time_left(&self) -> u32 {
        self.app.borrow().state().timer()
    }

    pub fn is_active(&self) -> bool {
        self.app.borrow().state().is_active()
    }

    /// Current board as a JSON array of holes.
    #[cfg(feature = "serde_json")]
    pub fn board_json(&self) -> Result<String, JsValue> {
        self.app
            .borrow()
            .state()
            .board_json()
            .map_err(|e| JsValue::from_str(&e))
    }
}

/// Build state, view, scheduler and controller, draw the idle board and bind input.
pub(crate) fn mount(config: GameConfig) -> Result<Game, JsValue> {
    config.validate().map_err(JsValue::from_str)?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let view = DomView::mount(doc)?;

    let app: Rc<RefCell<WebController>> = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
        let weak = weak.clone();
        let scheduler = IntervalScheduler::new(win, move |tick| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().on_tick(tick);
            }
        });
        RefCell::new(Controller::new(
            GameState::new(config),
            view,
            scheduler,
            SmallRng::from_entropy(),
        ))
    });

    {
        let ctl = app.borrow();
        let weak = Rc::downgrade(&app);
        ctl.view().bind_start_click(move || {
            if let Some(app) = weak.upgrade() {
                if let Err(e) = app.borrow_mut().start() {
                    web_sys::console::error_2(&JsValue::from_str("could not start round"), &e);
                }
            }
        })?;
        let weak = Rc::downgrade(&app);
        ctl.view().bind_hole_click(move |id| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().on_hole_click(id);
            }
        })?;
    }

    clog!(
        "whack-a-mole mounted: {} holes, {}s rounds",
        config.board_size,
        config.round_seconds
    );
    Ok(Game { app })
}
