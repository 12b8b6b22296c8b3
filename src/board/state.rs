//! Game state representation.
//!
//! Holds the complete snapshot of a match: the board, whose turn it is, the
//! per-side turn records, the derived supply sets and the control tally.

use serde::{Deserialize, Serialize};

use super::geometry::CellId;
use super::grid::Board;
use super::side::{PerSide, Side};
use super::unit::Unit;

/// Maximum number of moves a side may make in one turn.
pub const MAX_MOVES_PER_TURN: usize = 5;

/// A move made during the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: CellId,
    pub to: CellId,
}

/// The attack a side has made during the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackRecord {
    /// A unit was attacked: captured, or forced to retreat.
    Unit { cell: CellId, unit: Unit },
    /// An enemy arsenal was occupied and destroyed.
    ArsenalDestroyed { cell: CellId },
}

/// A forced-retreat obligation.
///
/// `origin` is set when a unit loses a combat by a margin of one and cleared
/// once it moves away; `destination` then records where it went until the
/// turn ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForcedRetreat {
    pub origin: Option<CellId>,
    pub destination: Option<CellId>,
}

impl ForcedRetreat {
    /// A retreat that still has to be carried out from `origin`.
    pub fn pending(origin: CellId) -> Self {
        ForcedRetreat {
            origin: Some(origin),
            destination: None,
        }
    }
}

/// Positional dominance over one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlCell {
    pub control: Side,
    /// Each side's defense minus the opponent's offense at this cell.
    pub relative: PerSide<i32>,
}

/// End-of-match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub loser: Side,
}

impl Outcome {
    pub const fn won_by(winner: Side) -> Self {
        Outcome {
            winner,
            loser: winner.opponent(),
        }
    }
}

/// Complete game state.
///
/// Everything except `board`, `current` and the turn records is derived and
/// rewritten by the recomputation pass after each mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current: Side,
    pub turn: u32,
    /// Supplied cells per side, ascending.
    pub supplied: PerSide<Vec<CellId>>,
    pub moves: PerSide<Vec<MoveRecord>>,
    pub attacks: PerSide<Option<AttackRecord>>,
    pub retreats: PerSide<ForcedRetreat>,
    pub control: Vec<ControlCell>,
    pub outcome: Option<Outcome>,
}

/// Control split down the middle: the first half of the cells belongs to
/// North, the rest to South.
pub fn initial_control(cells: usize) -> Vec<ControlCell> {
    (0..cells)
        .map(|id| ControlCell {
            control: if id < cells / 2 { Side::North } else { Side::South },
            relative: PerSide::default(),
        })
        .collect()
}

impl GameState {
    /// Wraps a board in fresh turn records without recomputing anything.
    pub fn from_board(board: Board) -> Self {
        let control = initial_control(board.len());
        GameState {
            board,
            current: Side::North,
            turn: 1,
            supplied: PerSide::default(),
            moves: PerSide::default(),
            attacks: PerSide::default(),
            retreats: PerSide::default(),
            control,
            outcome: None,
        }
    }

    /// Returns true if the cell is in the side's computed supplied set.
    pub fn is_supplied_cell(&self, side: Side, id: CellId) -> bool {
        self.supplied[side].binary_search(&id).is_ok()
    }

    /// Returns true if a unit of the side has already moved into this cell this turn.
    pub fn has_moved_into(&self, side: Side, id: CellId) -> bool {
        self.moves[side].iter().any(|m| m.to == id)
    }

    /// Number of arsenals the side currently owns.
    pub fn arsenal_count(&self, side: Side) -> usize {
        self.board
            .strongholds
            .iter()
            .flatten()
            .filter(|s| s.is_arsenal_of(side))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSize, Stronghold, StrongholdKind, UnitKind};

    #[test]
    fn fresh_state_has_empty_records() {
        let state = GameState::from_board(Board::default());
        assert_eq!(state.current, Side::North);
        assert_eq!(state.turn, 1);
        assert!(state.moves[Side::North].is_empty());
        assert!(state.attacks[Side::South].is_none());
        assert_eq!(state.retreats[Side::North], ForcedRetreat::default());
        assert!(state.outcome.is_none());
    }

    #[test]
    fn initial_control_is_split_in_half() {
        let state = GameState::from_board(Board::empty(BoardSize::new(4, 2)));
        let sides: Vec<_> = state.control.iter().map(|c| c.control).collect();
        assert_eq!(
            sides,
            vec![
                Side::North,
                Side::North,
                Side::North,
                Side::North,
                Side::South,
                Side::South,
                Side::South,
                Side::South
            ]
        );
    }

    #[test]
    fn control_cells_are_plain_values() {
        let mut state = GameState::from_board(Board::empty(BoardSize::new(2, 2)));
        let first = state.control[0];
        state.control[0].relative = PerSide([3, -3]);
        assert_eq!(first.relative, PerSide([0, 0]));

        let distinct: std::collections::HashSet<ControlCell> = state.control.iter().copied().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn arsenal_count_ignores_other_kinds() {
        let mut board = Board::empty(BoardSize::new(3, 3));
        board.set_stronghold(0, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(1, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(2, Some(Stronghold::new(StrongholdKind::Fortress, Some(Side::South))));
        board.set_unit(4, Some(Unit::new(UnitKind::Infantry, Side::South)));
        let state = GameState::from_board(board);
        assert_eq!(state.arsenal_count(Side::North), 2);
        assert_eq!(state.arsenal_count(Side::South), 0);
    }

    #[test]
    fn moved_into_tracks_destinations() {
        let mut state = GameState::from_board(Board::default());
        state.moves[Side::North].push(MoveRecord { from: 3, to: 4 });
        assert!(state.has_moved_into(Side::North, 4));
        assert!(!state.has_moved_into(Side::North, 3));
        assert!(!state.has_moved_into(Side::South, 4));
    }
}
