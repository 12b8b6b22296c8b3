//! Board representation and game-state types.
//!
//! Contains the core data structures for sides, units, strongholds, grid
//! geometry, the cell arrays, turn actions, and the overall game state.

pub mod action;
pub mod geometry;
pub mod grid;
pub mod side;
pub mod state;
pub mod stronghold;
pub mod unit;

pub use action::Action;
pub use geometry::{BoardSize, CellId, Position, DEFAULT_HEIGHT, DEFAULT_WIDTH, DIRECTIONS};
pub use grid::Board;
pub use side::{PerSide, Side, ALL_SIDES};
pub use state::{
    initial_control, AttackRecord, ControlCell, ForcedRetreat, GameState, MoveRecord, Outcome,
    MAX_MOVES_PER_TURN,
};
pub use stronghold::{Stronghold, StrongholdKind, ALL_STRONGHOLD_KINDS};
pub use unit::{Unit, UnitKind, UnitStats, ALL_UNIT_KINDS};
