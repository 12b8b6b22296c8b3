//! Movement legality: which units may be picked and where they may go.

use crate::board::{Board, CellId, GameState, Side, MAX_MOVES_PER_TURN};
use crate::error::CommandError;

use super::retreat::RETREAT_SPEED;

/// Cells a unit at `origin` can reach in `speed` steps.
///
/// Each step spreads one cell in every direction over empty, non-mountain
/// cells, and nothing further than `speed` from the origin is considered.
/// The origin itself is never part of the result for `speed > 0`, since it
/// is occupied by the moving unit.
pub fn move_range(board: &Board, origin: CellId, speed: usize) -> Vec<CellId> {
    if !board.size.contains(origin) {
        return Vec::new();
    }

    let o = board.size.position(origin);
    let reach = speed as i32;
    let mut window = Vec::new();
    for y in (o.y - reach)..=(o.y + reach) {
        for x in (o.x - reach)..=(o.x + reach) {
            if let Some(id) = board.size.cell_at(x, y) {
                if board.unit(id).is_none() && !board.is_mountain(id) {
                    window.push(id);
                }
            }
        }
    }

    let mut reached = vec![false; board.len()];
    reached[origin] = true;
    let mut result = vec![origin];
    for _ in 0..speed {
        let next: Vec<CellId> = window
            .iter()
            .copied()
            .filter(|&id| reached[id] || board.size.neighbors(id).any(|n| reached[n]))
            .collect();
        reached.iter_mut().for_each(|r| *r = false);
        for &id in &next {
            reached[id] = true;
        }
        result = next;
    }

    result
}

/// Checks whether `side` may pick up the unit at `cell` this turn.
///
/// Fails once the side has attacked or made its quota of moves, for a unit
/// that already moved, for anything other than the retreating unit while a
/// retreat is pending, and for enemy or unsupplied units. Relays may move
/// without supply.
pub fn can_pick(state: &GameState, side: Side, cell: CellId) -> Result<(), CommandError> {
    if !state.board.size.contains(cell) {
        return Err(CommandError::OffBoard(cell));
    }
    if state.attacks[side].is_some() {
        return Err(CommandError::AlreadyAttacked(side));
    }
    if state.moves[side].len() >= MAX_MOVES_PER_TURN {
        return Err(CommandError::MoveQuotaExhausted(side));
    }
    if state.has_moved_into(side, cell) {
        return Err(CommandError::AlreadyMoved(cell));
    }
    if let Some(origin) = state.retreats[side].origin {
        return if cell == origin {
            Ok(())
        } else {
            Err(CommandError::RetreatPending { origin })
        };
    }

    let unit = state.board.unit(cell).ok_or(CommandError::NoUnit(cell))?;
    if unit.side != side {
        return Err(CommandError::NotOwnUnit(cell));
    }
    if !unit.supplied && !unit.kind.is_relay() {
        return Err(CommandError::Unsupplied(cell));
    }
    Ok(())
}

/// Checks whether the unit at `from` can be placed on `to`.
///
/// A retreating unit only steps to an adjacent cell.
pub fn can_put(state: &GameState, from: CellId, to: CellId) -> Result<(), CommandError> {
    if !state.board.size.contains(to) {
        return Err(CommandError::OffBoard(to));
    }
    let unit = state.board.unit(from).ok_or(CommandError::NoUnit(from))?;
    let speed = if unit.retreating {
        RETREAT_SPEED
    } else {
        unit.stats().speed
    };
    if move_range(&state.board, from, speed).contains(&to) {
        Ok(())
    } else {
        Err(CommandError::OutOfRange { from, to })
    }
}
