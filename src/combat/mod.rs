//! Battle factors and attack resolution.
//!
//! Every supplied unit whose weapon range reaches a cell, along an
//! unobstructed straight line, contributes its offense or defense to combat
//! there. Cavalry lined up against a target adds a charge bonus, and
//! garrisoned strongholds add to defense.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellId, GameState, Side, StrongholdKind};
use crate::error::CommandError;
use crate::supply::{star_cells, star_search};

/// Furthest distance from which any unit can contribute to a combat.
pub const FIRE_RADIUS: usize = 3;

/// Nearest and furthest distance a charging cavalry line may extend.
pub const CHARGE_MIN: usize = 1;
pub const CHARGE_MAX: usize = 4;

/// Offense added per charging cavalry unit.
pub const CHARGE_BONUS: i32 = 3;

/// Which factor to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Offense,
    Defense,
}

/// An aggregated factor and the units that made it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleFactor {
    pub value: i32,
    pub contributors: Vec<CellId>,
}

/// Cells within `range` of the target along lines not cut by mountains.
pub fn fire_range(board: &Board, target: CellId, range: usize) -> Vec<CellId> {
    star_cells(board, target, 0, range, |_, id| !board.is_mountain(id))
}

/// Cavalry lined up to charge the unit at `target`.
///
/// A target in a fortress or on a pass cannot be charged. Along each
/// direction, the unbroken run of enemy cavalry starting next to the target
/// counts, as long as each is supplied, not retreating and not itself
/// sheltering in a fortress.
pub fn charging_cavalry(board: &Board, target: CellId) -> Vec<CellId> {
    let Some(defender) = board.unit(target) else {
        return Vec::new();
    };
    if matches!(
        board.stronghold(target).map(|s| s.kind),
        Some(StrongholdKind::Fortress | StrongholdKind::Pass)
    ) {
        return Vec::new();
    }

    star_search(board, target, CHARGE_MIN, CHARGE_MAX, |unit, id| {
        unit.is_some_and(|u| {
            u.kind.is_cavalry()
                && u.side != defender.side
                && u.supplied
                && !u.retreating
                && board.stronghold(id).map(|s| s.kind) != Some(StrongholdKind::Fortress)
        })
    })
    .into_iter()
    .flatten()
    .collect()
}

/// Aggregates `side`'s offense or defense at `target`.
pub fn battle_factor(board: &Board, side: Side, stance: Stance, target: CellId) -> BattleFactor {
    let offense = stance == Stance::Offense;

    let mut contributors: Vec<CellId> = fire_range(board, target, FIRE_RADIUS)
        .into_iter()
        .filter(|&id| {
            board.unit(id).is_some_and(|u| {
                board.size.distance(target, id) <= u.stats().range
                    && u.supplied
                    && u.side == side
                    && !(offense && (u.retreating || u.offense() == 0))
            })
        })
        .collect();

    let bonus = match stance {
        Stance::Offense if board.unit(target).is_some_and(|u| u.side != side) => {
            let chargers = charging_cavalry(board, target);
            let bonus = CHARGE_BONUS * chargers.len() as i32;
            for id in chargers {
                if !contributors.contains(&id) {
                    contributors.push(id);
                }
            }
            bonus
        }
        Stance::Offense => 0,
        Stance::Defense => contributors
            .iter()
            .filter(|&&id| board.unit(id).is_some_and(|u| u.stats().can_add_defense))
            .filter_map(|&id| board.stronghold(id))
            .map(|s| s.kind.defense_bonus())
            .filter(|&b| b > 0)
            .sum(),
    };

    let value = contributors
        .iter()
        .filter_map(|&id| board.unit(id))
        .map(|u| if offense { u.offense() } else { u.defense() })
        .sum::<i32>()
        + bonus;

    BattleFactor { value, contributors }
}

/// `side`'s defense at a cell minus its opponent's offense there.
pub fn relative_defense(board: &Board, target: CellId, side: Side) -> i32 {
    battle_factor(board, side, Stance::Defense, target).value
        - battle_factor(board, side.opponent(), Stance::Offense, target).value
}

/// What a successful attack does to the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Won by exactly one point: the defender must retreat.
    ForceRetreat,
    /// Won by more: the defender is removed.
    Capture,
}

/// Factors behind a legal attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackAssessment {
    pub target: CellId,
    pub offense: i32,
    pub defense: i32,
}

impl AttackAssessment {
    pub const fn margin(&self) -> i32 {
        self.offense - self.defense
    }

    pub const fn outcome(&self) -> AttackOutcome {
        if self.margin() == 1 {
            AttackOutcome::ForceRetreat
        } else {
            AttackOutcome::Capture
        }
    }
}

/// Checks whether `side` may attack `target` and by what margin.
pub fn assess_attack(state: &GameState, side: Side, target: CellId) -> Result<AttackAssessment, CommandError> {
    if !state.board.size.contains(target) {
        return Err(CommandError::OffBoard(target));
    }
    if let Some(origin) = state.retreats[side].origin {
        return Err(CommandError::RetreatPending { origin });
    }
    if state.attacks[side].is_some() {
        return Err(CommandError::AlreadyAttacked(side));
    }
    let defender = state.board.unit(target).ok_or(CommandError::NoUnit(target))?;
    if defender.side == side {
        return Err(CommandError::NotEnemy(target));
    }

    let offense = battle_factor(&state.board, side, Stance::Offense, target).value;
    let defense = battle_factor(&state.board, defender.side, Stance::Defense, target).value;
    if offense - defense <= 0 {
        return Err(CommandError::InsufficientForce {
            target,
            offense,
            defense,
        });
    }

    Ok(AttackAssessment {
        target,
        offense,
        defense,
    })
}
