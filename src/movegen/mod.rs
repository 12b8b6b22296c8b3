//! Legal command generation.
//!
//! Enumerates the moves, attacks and turn end available to the side to
//! move, and picks uniformly among them for random play.

pub mod movement;
pub mod retreat;

pub use movement::{can_pick, can_put, move_range};
pub use retreat::{retreat_destinations, retreat_is_stranded, RETREAT_SPEED};

use rand::Rng;

use crate::board::{Action, CellId, GameState};
use crate::combat::assess_attack;
use crate::supply::supply_prediction;

/// All moves the side to move can make right now.
pub fn legal_moves(state: &GameState) -> Vec<Action> {
    let side = state.current;
    let mut moves = Vec::new();

    for from in state.board.unit_cells(side) {
        if can_pick(state, side, from).is_err() {
            continue;
        }
        for to in move_range(&state.board, from, speed_of(state, from)) {
            moves.push(Action::Move { from, to });
        }
    }

    moves
}

/// All attacks the side to move can make right now.
pub fn legal_attacks(state: &GameState) -> Vec<Action> {
    let side = state.current;
    state
        .board
        .unit_cells(side.opponent())
        .into_iter()
        .filter(|&target| assess_attack(state, side, target).is_ok())
        .map(|target| Action::Attack { target })
        .collect()
}

/// Every legal action for the side to move: moves, then attacks, then the
/// turn end. Empty once the game is over.
pub fn legal_commands(state: &GameState) -> Vec<Action> {
    if state.outcome.is_some() {
        return Vec::new();
    }
    let mut actions = legal_moves(state);
    actions.extend(legal_attacks(state));
    actions.push(Action::EndTurn);
    actions
}

/// Picks one legal action uniformly at random, or `None` if the game is over.
pub fn random_action(state: &GameState, rng: &mut impl Rng) -> Option<Action> {
    let actions = legal_commands(state);
    if actions.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..actions.len());
    Some(actions[idx])
}

/// Destinations in reach of the unit at `origin` where it would still be
/// supplied, judged with the unit lifted off its cell.
pub fn supplied_destinations(state: &GameState, origin: CellId) -> Vec<CellId> {
    let Some(unit) = state.board.unit(origin) else {
        return Vec::new();
    };
    let forecast = supply_prediction(&state.board, unit.side, origin);
    move_range(&state.board, origin, speed_of(state, origin))
        .into_iter()
        .filter(|&to| forecast.covers(to))
        .collect()
}

fn speed_of(state: &GameState, from: usize) -> usize {
    match state.board.unit(from) {
        Some(unit) if unit.retreating => RETREAT_SPEED,
        Some(unit) => unit.stats().speed,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        Board, BoardSize, ForcedRetreat, Outcome, Side, Stronghold, StrongholdKind, Unit, UnitKind,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn skirmish() -> GameState {
        let mut board = Board::empty(BoardSize::new(5, 5));
        board.set_stronghold(0, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::North))));
        board.set_stronghold(24, Some(Stronghold::new(StrongholdKind::Arsenal, Some(Side::South))));
        board.set_unit(6, Some(Unit::new(UnitKind::Infantry, Side::North)));
        board.set_unit(8, Some(Unit::new(UnitKind::Artillery, Side::North)));
        board.set_unit(18, Some(Unit::new(UnitKind::Relay, Side::South)));
        GameState::from_board(board)
    }

    #[test]
    fn legal_commands_end_with_end_turn() {
        let state = skirmish();
        let actions = legal_commands(&state);
        assert_eq!(actions.last(), Some(&Action::EndTurn));
        assert!(actions.contains(&Action::Move { from: 6, to: 12 }));
        assert!(actions.contains(&Action::Attack { target: 18 }));
    }

    #[test]
    fn moves_only_for_side_to_move() {
        let state = skirmish();
        for action in legal_moves(&state) {
            let Action::Move { from, .. } = action else {
                panic!("expected a move, got {action:?}");
            };
            assert_eq!(state.board.unit(from).unwrap().side, Side::North);
        }
    }

    #[test]
    fn pending_retreat_limits_moves_to_the_retreating_unit() {
        let mut state = skirmish();
        state.board.unit_mut(8).unwrap().retreating = true;
        state.retreats[Side::North] = ForcedRetreat::pending(8);
        let moves = legal_moves(&state);
        assert!(!moves.is_empty());
        for action in &moves {
            let Action::Move { from, to } = *action else {
                unreachable!()
            };
            assert_eq!(from, 8);
            assert_eq!(state.board.size.distance(from, to), 1);
        }
        assert!(legal_attacks(&state).is_empty());
    }

    #[test]
    fn supplied_destinations_follow_the_arsenal_lines() {
        let state = skirmish();
        let dests = supplied_destinations(&state, 6);
        assert_eq!(dests, vec![0, 1, 2, 5, 10, 12]);
        assert!(supplied_destinations(&state, 3).is_empty());
    }

    #[test]
    fn finished_game_has_no_commands() {
        let mut state = skirmish();
        state.outcome = Some(Outcome::won_by(Side::South));
        assert!(legal_commands(&state).is_empty());
        assert_eq!(random_action(&state, &mut seeded_rng()), None);
    }

    #[test]
    fn random_action_is_legal() {
        let state = skirmish();
        let legal = legal_commands(&state);
        let mut rng = seeded_rng();
        for _ in 0..20 {
            let action = random_action(&state, &mut rng).unwrap();
            assert!(legal.contains(&action));
        }
    }
}
