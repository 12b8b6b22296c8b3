//! Forced-retreat movement.
//!
//! A unit beaten by a margin of one must step to an adjacent free cell on
//! its owner's next turn, or it is lost.

use crate::board::{Board, CellId, GameState, Side};

use super::movement::move_range;

/// How far a retreating unit may move.
pub const RETREAT_SPEED: usize = 1;

/// Free cells the unit at `origin` could retreat into.
pub fn retreat_destinations(board: &Board, origin: CellId) -> Vec<CellId> {
    move_range(board, origin, RETREAT_SPEED)
}

/// Returns true if the side's pending retreat cannot be carried out.
///
/// That is the case when the retreating unit is gone, is out of supply, or
/// has no free adjacent cell. A side with no pending retreat is never
/// stranded.
pub fn retreat_is_stranded(state: &GameState, side: Side) -> bool {
    let Some(origin) = state.retreats[side].origin else {
        return false;
    };
    match state.board.unit(origin) {
        Some(unit) if unit.supplied => retreat_destinations(&state.board, origin).is_empty(),
        _ => true,
    }
}
