//! The recomputation pass run after every mutation.
//!
//! Order matters: supply first, then strongholds (which read the fresh
//! `supplied` flags), supply again if an arsenal fell, then the control
//! tally and finally the end condition.

use log::info;

use crate::board::{
    initial_control, AttackRecord, CellId, ControlCell, GameState, Outcome, PerSide, Side,
    StrongholdKind,
};
use crate::combat::relative_defense;
use crate::supply;

impl GameState {
    /// Rederives supply, stronghold ownership, control and the outcome.
    ///
    /// Idempotent: a second call on an unchanged board changes nothing.
    pub fn refresh(&mut self) {
        supply::recompute(self);
        if self.settle_strongholds() {
            supply::recompute(self);
        }
        self.update_control();
        self.update_outcome();
    }

    /// Destroys captured arsenals and hands other strongholds to their
    /// occupants. Returns true if any arsenal fell.
    fn settle_strongholds(&mut self) -> bool {
        let mut fell = false;

        for id in 0..self.board.len() {
            let Some(stronghold) = self.board.stronghold(id).copied() else {
                continue;
            };
            let occupant = self.board.unit(id).copied();

            match (stronghold.kind, stronghold.owner) {
                (StrongholdKind::Mountain, _) => {}
                (StrongholdKind::Arsenal, Some(owner)) => {
                    let Some(unit) = occupant else { continue };
                    if unit.side != owner && unit.supplied && unit.offense() > 0 {
                        info!("{} destroyed the {} arsenal at {id}", unit.side, owner);
                        self.board.set_stronghold(id, None);
                        self.attacks[unit.side] = Some(AttackRecord::ArsenalDestroyed { cell: id });
                        fell = true;
                    }
                }
                _ => {
                    let owner = occupant
                        .filter(|u| u.stats().can_add_defense)
                        .map(|u| u.side);
                    if let Some(slot) = self.board.strongholds[id].as_mut() {
                        slot.owner = owner;
                    }
                }
            }
        }

        fell
    }

    fn update_control(&mut self) {
        let cells = self.board.len();
        if self.control.len() != cells {
            self.control = initial_control(cells);
        }

        for id in 0..cells {
            let north = relative_defense(&self.board, id, Side::North);
            let south = relative_defense(&self.board, id, Side::South);
            let previous = self.control[id].control;
            self.control[id] = ControlCell {
                control: control_of(self, id, previous, north, south),
                relative: PerSide::new(north, south),
            };
        }
    }

    fn update_outcome(&mut self) {
        if self.outcome.is_some() || !self.board.has_strongholds() {
            return;
        }
        let side = self.current;
        for loser in [side, side.opponent()] {
            if self.arsenal_count(loser) == 0 {
                let outcome = Outcome::won_by(loser.opponent());
                info!("{} has no arsenal left, {} wins", loser, outcome.winner);
                self.outcome = Some(outcome);
                return;
            }
        }
    }
}

/// Who controls a cell: its occupant, else whichever side has the higher
/// relative defense, else whoever held it before.
fn control_of(state: &GameState, id: CellId, previous: Side, north: i32, south: i32) -> Side {
    if let Some(unit) = state.board.unit(id) {
        return unit.side;
    }
    match north.cmp(&south) {
        std::cmp::Ordering::Greater => Side::North,
        std::cmp::Ordering::Less => Side::South,
        std::cmp::Ordering::Equal => previous,
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{
        AttackRecord, Board, BoardSize, GameState, Outcome, Side, Stronghold, StrongholdKind, Unit,
        UnitKind,
    };

    fn arsenal(side: Side) -> Option<Stronghold> {
        Some(Stronghold::new(StrongholdKind::Arsenal, Some(side)))
    }

    fn frontier() -> GameState {
        let mut board = Board::empty(BoardSize::new(7, 7));
        board.set_stronghold(0, arsenal(Side::North));
        board.set_stronghold(6, arsenal(Side::North));
        board.set_stronghold(48, arsenal(Side::South));
        board.set_stronghold(24, Some(Stronghold::neutral(StrongholdKind::Fortress)));
        board.set_stronghold(3, Some(Stronghold::neutral(StrongholdKind::Mountain)));
        GameState::from_board(board)
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut state = frontier();
        state.board.set_unit(8, Some(Unit::new(UnitKind::Infantry, Side::North)));
        state.board.set_unit(40, Some(Unit::new(UnitKind::Cavalry, Side::South)));
        state.refresh();
        let once = state.clone();
        state.refresh();
        assert_eq!(state, once);
    }

    #[test]
    fn stronghold_follows_defending_occupant() {
        let mut state = frontier();
        state.board.set_unit(24, Some(Unit::new(UnitKind::Infantry, Side::South)));
        state.refresh();
        assert_eq!(state.board.stronghold(24).unwrap().owner, Some(Side::South));

        // Relays cannot add defense, so they do not hold strongholds.
        state.board.set_unit(24, Some(Unit::new(UnitKind::Relay, Side::North)));
        state.refresh();
        assert_eq!(state.board.stronghold(24).unwrap().owner, None);

        state.board.set_unit(24, None);
        state.refresh();
        assert_eq!(state.board.stronghold(24).unwrap().owner, None);
    }

    #[test]
    fn owned_arsenal_keeps_owner_when_empty() {
        let mut state = frontier();
        state.refresh();
        assert_eq!(state.board.stronghold(0).unwrap().owner, Some(Side::North));
        assert_eq!(state.board.stronghold(3).unwrap().owner, None);
    }

    #[test]
    fn supplied_enemy_destroys_arsenal() {
        let mut state = frontier();
        // South infantry on North's arsenal at (6,0), supplied along the
        // right-hand column from South's arsenal at (6,6).
        state.board.set_unit(6, Some(Unit::new(UnitKind::Infantry, Side::South)));
        state.refresh();
        assert!(state.board.stronghold(6).is_none());
        assert_eq!(
            state.attacks[Side::South],
            Some(AttackRecord::ArsenalDestroyed { cell: 6 })
        );
        assert_eq!(state.arsenal_count(Side::North), 1);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn unsupplied_occupant_does_not_destroy() {
        let mut state = frontier();
        state.board.set_stronghold(34, Some(Stronghold::neutral(StrongholdKind::Mountain)));
        state.board.set_unit(6, Some(Unit::new(UnitKind::Infantry, Side::South)));
        state.refresh();
        assert!(!state.board.unit(6).unwrap().supplied);
        assert_eq!(state.board.stronghold(6), arsenal(Side::North).as_ref());
    }

    #[test]
    fn losing_last_arsenal_ends_the_game() {
        let mut state = frontier();
        state.board.set_stronghold(48, None);
        state.refresh();
        assert_eq!(state.outcome, Some(Outcome::won_by(Side::North)));
    }

    #[test]
    fn board_without_strongholds_never_ends() {
        let mut state = GameState::from_board(Board::empty(BoardSize::new(3, 3)));
        state.refresh();
        assert!(state.outcome.is_none());
    }

    #[test]
    fn occupied_cells_are_controlled_by_occupant() {
        let mut state = frontier();
        state.board.set_unit(2, Some(Unit::new(UnitKind::Relay, Side::South)));
        state.refresh();
        assert_eq!(state.control[2].control, Side::South);
        // A cell in nobody's range keeps its initial owner.
        assert_eq!(state.control[48].control, Side::South);
    }
}
