//! The cell arrays: one optional unit and one optional stronghold per cell.

use serde::{Deserialize, Serialize};

use super::geometry::{BoardSize, CellId};
use super::side::Side;
use super::stronghold::Stronghold;
use super::unit::Unit;

/// Units and strongholds laid out as flat arrays indexed by `CellId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: BoardSize,
    pub units: Vec<Option<Unit>>,
    pub strongholds: Vec<Option<Stronghold>>,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty(BoardSize::default())
    }
}

impl Board {
    /// Creates a board with no units or strongholds.
    pub fn empty(size: BoardSize) -> Self {
        Board {
            size,
            units: vec![None; size.cell_count()],
            strongholds: vec![None; size.cell_count()],
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, id: CellId) -> Option<&Unit> {
        self.units.get(id).and_then(Option::as_ref)
    }

    pub fn unit_mut(&mut self, id: CellId) -> Option<&mut Unit> {
        self.units.get_mut(id).and_then(Option::as_mut)
    }

    pub fn stronghold(&self, id: CellId) -> Option<&Stronghold> {
        self.strongholds.get(id).and_then(Option::as_ref)
    }

    /// Replaces the unit at a cell. Returns false if the id is off the board.
    pub fn set_unit(&mut self, id: CellId, unit: Option<Unit>) -> bool {
        match self.units.get_mut(id) {
            Some(slot) => {
                *slot = unit;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the unit at a cell.
    pub fn take_unit(&mut self, id: CellId) -> Option<Unit> {
        self.units.get_mut(id).and_then(Option::take)
    }

    /// Replaces the stronghold at a cell. Returns false if the id is off the board.
    pub fn set_stronghold(&mut self, id: CellId, stronghold: Option<Stronghold>) -> bool {
        match self.strongholds.get_mut(id) {
            Some(slot) => {
                *slot = stronghold;
                true
            }
            None => false,
        }
    }

    /// Returns true if the cell holds a mountain.
    pub fn is_mountain(&self, id: CellId) -> bool {
        self.stronghold(id).is_some_and(Stronghold::is_mountain)
    }

    /// Collects the ids of all cells matching a predicate over the cell contents.
    pub fn cells_where<F>(&self, pred: F) -> Vec<CellId>
    where
        F: Fn(Option<&Unit>, Option<&Stronghold>, CellId) -> bool,
    {
        (0..self.len())
            .filter(|&id| pred(self.unit(id), self.stronghold(id), id))
            .collect()
    }

    /// Cells holding a unit of the given side.
    pub fn unit_cells(&self, side: Side) -> Vec<CellId> {
        self.cells_where(|u, _, _| u.is_some_and(|u| u.side == side))
    }

    /// Returns true if any stronghold exists on the board.
    pub fn has_strongholds(&self) -> bool {
        self.strongholds.iter().any(Option::is_some)
    }
}
