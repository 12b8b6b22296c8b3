//! Turn sequencing and the play commands.
//!
//! Every command validates first and mutates only once it is known to be
//! legal, so a rejected command leaves the state untouched.

use log::{debug, info};

use crate::board::{Action, AttackRecord, Board, CellId, ForcedRetreat, GameState, MoveRecord};
use crate::combat::{assess_attack, AttackOutcome};
use crate::error::CommandError;
use crate::movegen::{can_pick, can_put, retreat_is_stranded};

impl GameState {
    /// Sets up a match on `board` with North to move and all derived data
    /// computed.
    pub fn start(board: Board) -> Self {
        let mut state = GameState::from_board(board);
        state.refresh();
        state
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        match self.outcome {
            Some(_) => Err(CommandError::GameOver),
            None => Ok(()),
        }
    }

    /// Opens the side to move's turn.
    ///
    /// Clears its move and attack records. A pending retreat that can no
    /// longer be carried out costs the retreating unit.
    pub fn begin_turn(&mut self) {
        let side = self.current;
        self.moves[side].clear();
        self.attacks[side] = None;

        if retreat_is_stranded(self, side) {
            if let Some(origin) = self.retreats[side].origin {
                info!("{side} loses the unit at {origin}: no way to retreat");
                self.board.set_unit(origin, None);
            }
            self.retreats[side] = ForcedRetreat::default();
        }

        self.refresh();
    }

    /// Closes the side to move's turn and opens the opponent's.
    pub fn end_turn(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let side = self.current;

        if let Some(dest) = self.retreats[side].destination {
            if let Some(unit) = self.board.unit_mut(dest) {
                unit.retreating = false;
            }
            self.retreats[side] = ForcedRetreat::default();
        }
        self.refresh();

        self.current = side.opponent();
        self.turn += 1;
        self.begin_turn();
        Ok(())
    }

    /// Moves the unit at `from` to `to` for the side to move.
    pub fn move_piece(&mut self, from: CellId, to: CellId) -> Result<(), CommandError> {
        self.ensure_running()?;
        let side = self.current;
        can_pick(self, side, from)?;
        can_put(self, from, to)?;

        let mut unit = self.board.take_unit(from).ok_or(CommandError::NoUnit(from))?;
        unit.supplied = false;
        self.board.set_unit(to, Some(unit));
        self.moves[side].push(MoveRecord { from, to });

        if self.retreats[side].origin.is_some() {
            self.retreats[side] = ForcedRetreat {
                origin: None,
                destination: Some(to),
            };
        }

        self.refresh();
        Ok(())
    }

    /// Attacks the enemy unit at `target` with the side to move.
    pub fn attack(&mut self, target: CellId) -> Result<AttackOutcome, CommandError> {
        self.ensure_running()?;
        let side = self.current;
        let assessment = assess_attack(self, side, target)?;
        let unit = *self.board.unit(target).ok_or(CommandError::NoUnit(target))?;

        self.attacks[side] = Some(AttackRecord::Unit { cell: target, unit });
        let outcome = assessment.outcome();
        match outcome {
            AttackOutcome::ForceRetreat => {
                if let Some(defender) = self.board.unit_mut(target) {
                    defender.retreating = true;
                }
                self.retreats[unit.side] = ForcedRetreat::pending(target);
            }
            AttackOutcome::Capture => {
                self.board.set_unit(target, None);
            }
        }
        debug!(
            "{side} attacks {target}: {} against {}, {outcome:?}",
            assessment.offense, assessment.defense
        );

        self.refresh();
        Ok(outcome)
    }

    /// Applies one action for the side to move.
    pub fn apply(&mut self, action: Action) -> Result<(), CommandError> {
        let result = match action {
            Action::Move { from, to } => self.move_piece(from, to),
            Action::Attack { target } => self.attack(target).map(|_| ()),
            Action::EndTurn => self.end_turn(),
        };
        if let Err(e) = &result {
            debug!("{action:?} rejected: {e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{
        Action, Board, BoardSize, ForcedRetreat, GameState, Outcome, Side, Stronghold, StrongholdKind,
        Unit, UnitKind, MAX_MOVES_PER_TURN,
    };
    use crate::combat::AttackOutcome;
    use crate::error::CommandError;

    /// 9x9 board: North arsenal at (4,0), South arsenal at (4,8), South
    /// infantry on a pass at (4,5) defending with 6 + 2.
    fn duel() -> Board {
        let mut board = Board::empty(BoardSize::new(9, 9));
        let at = |x, y| board.size.cell_at(x, y).unwrap();
        let (north_arsenal, south_arsenal, pass) = (at(4, 0), at(4, 8), at(4, 5));
        board.set_stronghold(north_arsenal, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(south_arsenal, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::South))));
        board.set_stronghold(pass, Some(Stronghold::neutral(StrongholdKind::Pass)));
        board.set_unit(pass, Some(Unit::new(UnitKind::Infantry, Side::South)));
        board
    }

    fn cell(state: &GameState, x: i32, y: i32) -> usize {
        state.board.size.cell_at(x, y).unwrap()
    }

    #[test]
    fn start_computes_supply() {
        let state = GameState::start(duel());
        let pass = cell(&state, 4, 5);
        assert!(state.board.unit(pass).unwrap().supplied);
        assert_eq!(state.board.stronghold(pass).unwrap().owner, Some(Side::South));
        assert!(state.outcome.is_none());
    }

    #[test]
    fn margin_of_one_forces_retreat() {
        let mut board = duel();
        let infantry = board.size.cell_at(4, 4).unwrap();
        let artillery = board.size.cell_at(4, 2).unwrap();
        board.set_unit(infantry, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(artillery, Some(Unit::new(UnitKind::Artillery, Side::North)));
        let mut state = GameState::start(board);
        let target = cell(&state, 4, 5);

        assert_eq!(state.attack(target), Ok(AttackOutcome::ForceRetreat));
        let unit = state.board.unit(target).unwrap();
        assert!(unit.retreating);
        assert_eq!(state.retreats[Side::South], ForcedRetreat::pending(target));
    }

    #[test]
    fn wider_margin_captures() {
        let mut board = duel();
        let front = board.size.cell_at(4, 3).unwrap();
        let back = board.size.cell_at(4, 2).unwrap();
        board.set_unit(front, Some(Unit::new(UnitKind::Artillery, Side::North)));
        board.set_unit(back, Some(Unit::new(UnitKind::Artillery, Side::North)));
        let mut state = GameState::start(board);
        let target = cell(&state, 4, 5);

        assert_eq!(state.attack(target), Ok(AttackOutcome::Capture));
        assert!(state.board.unit(target).is_none());
    }

    #[test]
    fn zero_margin_is_rejected_without_change() {
        let mut board = duel();
        let front = board.size.cell_at(4, 4).unwrap();
        let back = board.size.cell_at(4, 3).unwrap();
        board.set_unit(front, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(back, Some(Unit::new(UnitKind::Infantry, Side::North)));
        let mut state = GameState::start(board);
        let before = state.clone();
        let target = cell(&state, 4, 5);

        assert_eq!(
            state.attack(target),
            Err(CommandError::InsufficientForce {
                target,
                offense: 8,
                defense: 8
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn second_attack_is_rejected() {
        let mut board = duel();
        let front = board.size.cell_at(4, 3).unwrap();
        let back = board.size.cell_at(4, 2).unwrap();
        board.set_unit(front, Some(Unit::new(UnitKind::Artillery, Side::North)));
        board.set_unit(back, Some(Unit::new(UnitKind::Artillery, Side::North)));
        let mut state = GameState::start(board);
        let target = cell(&state, 4, 5);
        state.attack(target).unwrap();
        assert_eq!(state.attack(target), Err(CommandError::AlreadyAttacked(Side::North)));
        assert_eq!(
            state.move_piece(front, cell(&state, 3, 3)),
            Err(CommandError::AlreadyAttacked(Side::North))
        );
    }

    #[test]
    fn move_quota_is_enforced() {
        let mut board = Board::empty(BoardSize::new(9, 9));
        board.set_stronghold(0, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(80, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::South))));
        for x in 0..6 {
            board.set_unit(9 + x, Some(Unit::new(UnitKind::Infantry, Side::North)));
        }
        let mut state = GameState::start(board);

        for x in 0..MAX_MOVES_PER_TURN {
            let from = 9 + x;
            assert_eq!(state.move_piece(from, from + 9), Ok(()), "move {x}");
        }
        assert_eq!(
            state.move_piece(14, 23),
            Err(CommandError::MoveQuotaExhausted(Side::North))
        );
    }

    #[test]
    fn moved_unit_cannot_move_again() {
        let mut board = Board::empty(BoardSize::new(9, 9));
        board.set_stronghold(0, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(80, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::South))));
        board.set_unit(10, Some(Unit::new(UnitKind::Infantry, Side::North)));
        let mut state = GameState::start(board);
        state.move_piece(10, 20).unwrap();
        assert_eq!(state.move_piece(20, 30), Err(CommandError::AlreadyMoved(20)));
        assert_eq!(state.moves[Side::North].len(), 1);
    }

    #[test]
    fn end_turn_passes_play_and_clears_records() {
        let mut board = Board::empty(BoardSize::new(9, 9));
        board.set_stronghold(0, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(80, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::South))));
        board.set_unit(10, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(70, Some(Unit::new(UnitKind::Infantry, Side::South)));
        let mut state = GameState::start(board);
        state.move_piece(10, 20).unwrap();
        state.end_turn().unwrap();
        assert_eq!(state.current, Side::South);
        assert_eq!(state.turn, 2);
        assert!(state.moves[Side::South].is_empty());
        // North's record stays until its own next turn begins.
        assert_eq!(state.moves[Side::North].len(), 1);

        state.end_turn().unwrap();
        assert_eq!(state.current, Side::North);
        assert!(state.moves[Side::North].is_empty());
        assert_eq!(state.move_piece(20, 30), Ok(()));
    }

    #[test]
    fn forced_retreat_sequence() {
        let mut board = duel();
        let infantry = board.size.cell_at(4, 4).unwrap();
        let artillery = board.size.cell_at(4, 2).unwrap();
        board.set_unit(infantry, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(artillery, Some(Unit::new(UnitKind::Artillery, Side::North)));
        let reserve = board.size.cell_at(2, 7).unwrap();
        board.set_unit(reserve, Some(Unit::new(UnitKind::Infantry, Side::South)));
        let mut state = GameState::start(board);
        let target = cell(&state, 4, 5);
        state.attack(target).unwrap();
        state.end_turn().unwrap();
        assert_eq!(state.current, Side::South);

        // Only the retreating unit may move, and only one step.
        let retreat_to = cell(&state, 4, 6);
        assert_eq!(
            state.move_piece(reserve, cell(&state, 2, 6)),
            Err(CommandError::RetreatPending { origin: target })
        );
        assert_eq!(
            state.move_piece(target, cell(&state, 4, 7)),
            Err(CommandError::OutOfRange {
                from: target,
                to: cell(&state, 4, 7)
            })
        );
        assert_eq!(state.move_piece(target, retreat_to), Ok(()));
        assert_eq!(
            state.retreats[Side::South],
            ForcedRetreat {
                origin: None,
                destination: Some(retreat_to)
            }
        );
        assert!(state.board.unit(retreat_to).unwrap().retreating);

        // The obligation is closed at turn end.
        state.end_turn().unwrap();
        assert!(!state.board.unit(retreat_to).unwrap().retreating);
        assert_eq!(state.retreats[Side::South], ForcedRetreat::default());
    }

    #[test]
    fn stranded_retreat_loses_the_unit() {
        let mut board = duel();
        let infantry = board.size.cell_at(4, 4).unwrap();
        let artillery = board.size.cell_at(4, 2).unwrap();
        board.set_unit(infantry, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(artillery, Some(Unit::new(UnitKind::Artillery, Side::North)));
        // Hem the South infantry in with relays, which add nothing to the
        // fight at (4,5) and leave South's supply column open.
        for (x, y) in [(3, 4), (5, 4)] {
            let id = board.size.cell_at(x, y).unwrap();
            board.set_unit(id, Some(Unit::new(UnitKind::Relay, Side::North)));
        }
        for (x, y) in [(3, 5), (5, 5), (3, 6), (4, 6), (5, 6)] {
            let id = board.size.cell_at(x, y).unwrap();
            board.set_unit(id, Some(Unit::new(UnitKind::Relay, Side::South)));
        }
        let mut state = GameState::start(board);
        let target = cell(&state, 4, 5);
        assert_eq!(state.attack(target), Ok(AttackOutcome::ForceRetreat));

        state.end_turn().unwrap();
        assert!(state.board.unit(target).is_none());
        assert_eq!(state.retreats[Side::South], ForcedRetreat::default());
    }

    #[test]
    fn commands_are_rejected_after_the_game_ends() {
        let mut state = GameState::start(duel());
        state.outcome = Some(Outcome::won_by(Side::South));
        let before = state.clone();
        assert_eq!(state.end_turn(), Err(CommandError::GameOver));
        assert_eq!(state.apply(Action::Attack { target: 0 }), Err(CommandError::GameOver));
        assert_eq!(state.move_piece(0, 1), Err(CommandError::GameOver));
        assert_eq!(state, before);
    }
}
