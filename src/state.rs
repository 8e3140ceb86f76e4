//! Round state for the mole board.
//!
//! `GameState` is plain data plus invariant-preserving mutators. It never
//! touches the DOM or any clock; the controller owns it and drives every
//! change. All mutators are total: an invalid request (out-of-range id, a
//! second mole in the same hole, ticking an exhausted timer) is a no-op that
//! reports `false` where a result is meaningful.

use rand::Rng;
use rand::seq::SliceRandom;

/// Index of a hole on the board (0-based, stable for the life of a round).
pub type HoleId = usize;

pub const DEFAULT_BOARD_SIZE: usize = 12;
pub const DEFAULT_ROUND_SECONDS: u32 = 30;
pub const DEFAULT_MAX_MOLES: usize = 3;
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 1_000;

// --- Configuration -----------------------------------------------------------

/// Tunables for a game. `Default` reproduces the classic 12 hole / 30 second
/// / 3 mole layout with one tick per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub board_size: usize,
    pub round_seconds: u32,
    pub max_moles: usize,
    /// Period of both the spawn tick and the timer tick.
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            round_seconds: DEFAULT_ROUND_SECONDS,
            max_moles: DEFAULT_MAX_MOLES,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Reject layouts that could never produce a playable round.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.board_size == 0 {
            return Err("board_size must be at least 1");
        }
        if self.round_seconds == 0 {
            return Err("round_seconds must be at least 1");
        }
        if self.max_moles == 0 {
            return Err("max_moles must be at least 1");
        }
        if self.max_moles > self.board_size {
            return Err("max_moles cannot exceed board_size");
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1");
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing fields take defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let cfg: GameConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// --- Board -------------------------------------------------------------------

/// One fixed slot on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hole {
    pub id: HoleId,
    pub has_mole: bool,
}

/// Authoritative state of the current (or last) round.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    holes: Vec<Hole>,
    score: u32,
    timer: u32,
    is_game_active: bool,
    active_mole_count: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    /// Fresh idle state: empty board, zero score, full timer.
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            config,
            holes: Vec::with_capacity(config.board_size),
            score: 0,
            timer: config.round_seconds,
            is_game_active: false,
            active_mole_count: 0,
        };
        state.init_holes();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// The board as a JSON array of `{"id", "has_mole"}` objects.
    #[cfg(feature = "serde_json")]
    pub fn board_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.holes).map_err(|e| e.to_string())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn is_active(&self) -> bool {
        self.is_game_active
    }

    pub fn active_mole_count(&self) -> usize {
        self.active_mole_count
    }

    /// Whether hole `id` exists and currently holds a mole.
    pub fn has_mole(&self, id: HoleId) -> bool {
        self.holes.get(id).is_some_and(|h| h.has_mole)
    }

    /// Replace the board with `board_size` empty holes.
    pub fn init_holes(&mut self) {
        self.holes.clear();
        self.holes
            .extend((0..self.config.board_size).map(|id| Hole { id, has_mole: false }));
        self.active_mole_count = 0;
    }

    /// Uniformly random id among the currently empty holes, `None` when full.
    pub fn random_empty_hole<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HoleId> {
        let empty: Vec<HoleId> = self
            .holes
            .iter()
            .filter(|h| !h.has_mole)
            .map(|h| h.id)
            .collect();
        empty.choose(rng).copied()
    }

    pub fn add_mole(&mut self, id: HoleId) -> bool {
        match self.holes.get_mut(id) {
            Some(hole) if !hole.has_mole => {
                hole.has_mole = true;
                self.active_mole_count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn remove_mole(&mut self, id: HoleId) -> bool {
        match self.holes.get_mut(id) {
            Some(hole) if hole.has_mole => {
                hole.has_mole = false;
                self.active_mole_count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Count the timer down by one second, clamped at zero. Returns the new value.
    pub fn decrement_timer(&mut self) -> u32 {
        self.timer = self.timer.saturating_sub(1);
        self.timer
    }

    pub fn reset_timer(&mut self) {
        self.timer = self.config.round_seconds;
    }

    pub fn is_game_over(&self) -> bool {
        self.timer == 0
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_game_active = active;
    }

    pub fn can_add_mole(&self) -> bool {
        self.active_mole_count < self.config.max_moles
    }
}
