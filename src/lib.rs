//! Whack-a-Mole core crate.
//!
//! A grid of holes, moles popping up on a one second beat, a click to whack
//! them and a countdown that ends the round. The game model (`state`) and the
//! rules engine (`controller`) are plain Rust and testable on the host; `dom`
//! and `app` adapt them to the browser through `web-sys`.

use wasm_bindgen::prelude::*;

mod app;
pub mod controller;
pub mod dom;
mod log;
pub mod state;
pub mod view;

pub use app::Game;
pub use controller::{Controller, Scheduler, Tick};
pub use state::{GameConfig, GameState, Hole, HoleId};
pub use view::View;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount the game on the page with the classic settings. Keep the returned
/// handle alive for as long as the game should run.
#[wasm_bindgen]
pub fn start_game() -> Result<Game, JsValue> {
    app::mount(GameConfig::default())
}

/// Like `start_game`, with a JSON object overriding any of `board_size`,
/// `round_seconds`, `max_moles` and `tick_interval_ms`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<Game, JsValue> {
    let config = GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
    app::mount(config)
}
