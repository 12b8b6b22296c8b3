//! Rejection reasons for game commands.

use crate::board::{CellId, Side, MAX_MOVES_PER_TURN};
use crate::protocol::fen::FenError;

/// Why a command was rejected. A rejected command never mutates the state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("cell {0} is off the board")]
    OffBoard(CellId),

    #[error("the game is over")]
    GameOver,

    #[error("{0} has already attacked this turn")]
    AlreadyAttacked(Side),

    #[error("{0} has used all {max} moves this turn", max = MAX_MOVES_PER_TURN)]
    MoveQuotaExhausted(Side),

    #[error("unit at {0} has already moved this turn")]
    AlreadyMoved(CellId),

    #[error("a forced retreat from {origin} is pending")]
    RetreatPending { origin: CellId },

    #[error("no unit at {0}")]
    NoUnit(CellId),

    #[error("unit at {0} does not belong to the side to move")]
    NotOwnUnit(CellId),

    #[error("unit at {0} is out of supply")]
    Unsupplied(CellId),

    #[error("cell {to} is out of reach from {from}")]
    OutOfRange { from: CellId, to: CellId },

    #[error("unit at {0} is not an enemy")]
    NotEnemy(CellId),

    #[error("attack on {target} fails: offense {offense} against defense {defense}")]
    InsufficientForce {
        target: CellId,
        offense: i32,
        defense: i32,
    },

    #[error(transparent)]
    Fen(#[from] FenError),
}
