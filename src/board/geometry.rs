//! Grid coordinates and distances.
//!
//! Cells are addressed by a linear row-major index. All adjacency in the game
//! is "king-move" adjacency, so distance is the Chebyshev metric.

use serde::{Deserialize, Serialize};

/// Linear index of a cell, `y * width + x`.
pub type CellId = usize;

/// Width of the standard board.
pub const DEFAULT_WIDTH: usize = 25;

/// Height of the standard board.
pub const DEFAULT_HEIGHT: usize = 20;

/// The eight compass directions as `(dx, dy)` steps.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell coordinate. Signed so that off-board neighbours can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Board dimensions, fixed for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl BoardSize {
    pub const fn new(width: usize, height: usize) -> Self {
        BoardSize { width, height }
    }

    /// Total number of cells.
    pub const fn cell_count(self) -> usize {
        self.width * self.height
    }

    /// Length of the longest straight line on the board.
    pub fn max_extent(self) -> usize {
        self.width.max(self.height)
    }

    /// Converts a coordinate to a cell id, or `None` if it lies off the board.
    pub fn cell_at(self, x: i32, y: i32) -> Option<CellId> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    /// Converts a cell id back to its coordinate.
    pub fn position(self, id: CellId) -> Position {
        Position {
            x: (id % self.width) as i32,
            y: (id / self.width) as i32,
        }
    }

    /// Returns true if the id addresses a cell of this board.
    pub const fn contains(self, id: CellId) -> bool {
        id < self.cell_count()
    }

    /// Chebyshev distance between two cells.
    pub fn distance(self, a: CellId, b: CellId) -> usize {
        let pa = self.position(a);
        let pb = self.position(b);
        (pa.x - pb.x).unsigned_abs().max((pa.y - pb.y).unsigned_abs()) as usize
    }

    /// The cell `n` steps from `id` in direction `(dx, dy)`.
    pub fn offset(self, id: CellId, (dx, dy): (i32, i32), n: i32) -> Option<CellId> {
        let p = self.position(id);
        self.cell_at(p.x + dx * n, p.y + dy * n)
    }

    /// The on-board cells at distance exactly 1.
    pub fn neighbors(self, id: CellId) -> impl Iterator<Item = CellId> {
        DIRECTIONS
            .into_iter()
            .filter_map(move |dir| self.offset(id, dir, 1))
    }

    /// Returns true if some cell in `set` lies within `dis` of `id`.
    pub fn near_any(self, set: &[CellId], id: CellId, dis: usize) -> bool {
        set.iter().any(|&c| self.distance(c, id) <= dis)
    }
}
