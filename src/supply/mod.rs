//! Supply network computation.
//!
//! A side's direct supply is every cell on an unobstructed straight line from
//! one of its arsenals, extended by relays that themselves sit on such a
//! line. A unit is supplied if it is directly supplied or touches, through a
//! chain of adjacent friendly units, one that is.

pub mod rays;

use std::collections::VecDeque;

use log::warn;

use crate::board::{Board, BoardSize, CellId, GameState, Side, Unit};

pub use rays::{star_cells, star_search};

/// Number of relay passes after the arsenal pass.
///
/// Relay chains stop at this depth: a relay first reached in the last pass
/// does not cast.
pub const RELAY_PASSES: usize = 2;


/// Returns true if the cell stops a supply line of `side`.
///
/// Mountains block, as does any enemy unit that can fight: positive offense,
/// supplied, and not retreating.
pub fn blocks_supply(board: &Board, side: Side, unit: Option<&Unit>, id: CellId) -> bool {
    if board.is_mountain(id) {
        return true;
    }
    unit.is_some_and(|u| u.side != side && u.offense() > 0 && u.supplied && !u.retreating)
}

/// Supply lines cast from a single arsenal or relay.
pub fn direct_supply_from(board: &Board, origin: CellId, side: Side) -> Vec<Vec<CellId>> {
    star_search(board, origin, 0, board.size.max_extent(), |unit, id| {
        !blocks_supply(board, side, unit, id)
    })
}

fn mark_lines(mask: &mut [bool], lines: Vec<Vec<CellId>>) {
    for id in lines.into_iter().flatten() {
        mask[id] = true;
    }
}

/// Per-cell mask of the side's directly supplied cells.
fn direct_supply_mask(board: &Board, side: Side) -> Vec<bool> {
    let mut mask = vec![false; board.len()];

    let arsenals = board.cells_where(|_, s, _| s.is_some_and(|s| s.is_arsenal_of(side)));
    for origin in arsenals {
        mark_lines(&mut mask, direct_supply_from(board, origin, side));
    }

    let relays = board.cells_where(|u, _, _| u.is_some_and(|u| u.side == side && u.kind.is_relay()));
    for _ in 0..RELAY_PASSES {
        let active: Vec<CellId> = relays.iter().copied().filter(|&id| mask[id]).collect();
        for origin in active {
            mark_lines(&mut mask, direct_supply_from(board, origin, side));
        }
    }

    mask
}

fn mask_to_cells(mask: &[bool]) -> Vec<CellId> {
    mask.iter()
        .enumerate()
        .filter_map(|(id, &on)| on.then_some(id))
        .collect()
}

/// Cells directly supplied by the side's arsenals and active relays, ascending.
pub fn direct_supply(board: &Board, side: Side) -> Vec<CellId> {
    mask_to_cells(&direct_supply_mask(board, side))
}

/// Grows the seed cells through adjacent cells accepted by `member`.
fn connected_from(size: BoardSize, len: usize, seeds: &[CellId], member: impl Fn(CellId) -> bool) -> Vec<bool> {
    let mut included = vec![false; len];
    let mut frontier = VecDeque::with_capacity(seeds.len());
    for &id in seeds {
        if !included[id] {
            included[id] = true;
            frontier.push_back(id);
        }
    }

    while let Some(id) = frontier.pop_front() {
        for next in size.neighbors(id) {
            if !included[next] && member(next) {
                included[next] = true;
                frontier.push_back(next);
            }
        }
    }

    included
}

fn supplied_from_mask(board: &Board, side: Side, direct: &[bool]) -> Vec<CellId> {
    let friendly = |id: CellId| board.unit(id).is_some_and(|u| u.side == side);
    let seeds: Vec<CellId> = (0..board.len()).filter(|&id| direct[id] && friendly(id)).collect();
    mask_to_cells(&connected_from(board.size, board.len(), &seeds, friendly))
}

/// Cells of the side's supplied units, ascending.
pub fn supplied_cells(board: &Board, side: Side) -> Vec<CellId> {
    supplied_from_mask(board, side, &direct_supply_mask(board, side))
}

/// Writes each unit's `supplied` flag from its side's computed set.
fn apply_supply_flags(state: &mut GameState) {
    let supplied = &state.supplied;
    for (id, slot) in state.board.units.iter_mut().enumerate() {
        if let Some(unit) = slot {
            unit.supplied = supplied[unit.side].binary_search(&id).is_ok();
        }
    }
}

/// Recomputes both sides' supply and rewrites every unit's flag.
///
/// The side to move is computed first from the current snapshot, then the
/// opponent from the updated one. Because lines are blocked by supplied
/// enemies, the round repeats until neither set changes. A chain of mutual
/// blockers settles one link per round, so the bound grows with the number
/// of units on the board.
pub fn recompute(state: &mut GameState) {
    let order = [state.current, state.current.opponent()];
    let max_rounds = state.board.units.iter().flatten().count() + 2;
    for _ in 0..max_rounds {
        let mut changed = false;
        for side in order {
            let cells = supplied_cells(&state.board, side);
            if cells != state.supplied[side] {
                state.supplied[side] = cells;
                changed = true;
            }
            apply_supply_flags(state);
        }
        if !changed {
            return;
        }
    }
    warn!("supply did not settle after {max_rounds} rounds");
}

/// Where a picked unit could go and still be in supply.
#[derive(Debug, Clone)]
pub struct SupplyForecast {
    size: BoardSize,
    direct: Vec<bool>,
    connected: Vec<CellId>,
}

impl SupplyForecast {
    /// Returns true if a unit placed at `dest` would be directly supplied or
    /// adjacent to a supplied friendly unit.
    pub fn covers(&self, dest: CellId) -> bool {
        self.direct.get(dest).copied().unwrap_or(false) || self.size.near_any(&self.connected, dest, 1)
    }
}

/// Predicts supply for the side after lifting the unit at `origin`.
pub fn supply_prediction(board: &Board, side: Side, origin: CellId) -> SupplyForecast {
    let mut lifted = board.clone();
    lifted.set_unit(origin, None);
    let direct = direct_supply_mask(&lifted, side);
    let connected = supplied_from_mask(&lifted, side, &direct);
    SupplyForecast {
        size: lifted.size,
        direct,
        connected,
    }
}
