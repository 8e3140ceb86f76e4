//! Presentation boundary. The controller pushes every visible change through
//! this trait and never reads anything back; implementors only display what
//! they are handed.

use crate::state::{Hole, HoleId};

pub trait View {
    /// Full redraw of the board in hole-id order.
    fn render_board(&mut self, holes: &[Hole]);
    /// Incremental update of a single hole.
    fn update_hole(&mut self, id: HoleId, has_mole: bool);
    fn update_score(&mut self, score: u32);
    fn update_timer(&mut self, seconds: u32);
    /// Clear every mole indicator without rebuilding the board.
    fn reset_board(&mut self);
    /// Fired exactly once when a round runs out of time. Must not block.
    fn notify_round_over(&mut self, final_score: u32);
}
