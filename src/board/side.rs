//! The two sides and per-side storage.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two competing players.
///
/// North deploys from the top rows of the standard board, South from the
/// bottom rows. The serialized form uses `'0'` and `'1'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    North = 0,
    South = 1,
}

/// Both sides in index order.
pub const ALL_SIDES: [Side; 2] = [Side::North, Side::South];

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
        }
    }

    /// Returns the single-character board notation.
    pub const fn fen_char(self) -> char {
        match self {
            Side::North => '0',
            Side::South => '1',
        }
    }

    /// Parses a side from its single-character board notation.
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            '0' => Some(Side::North),
            '1' => Some(Side::South),
            _ => None,
        }
    }

    /// Parses a side from a protocol token: `0`, `1`, `north` or `south`.
    pub fn from_name(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "north" => Some(Side::North),
            "1" | "south" => Some(Side::South),
            _ => None,
        }
    }

    /// Returns the lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held separately for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerSide<T>(pub [T; 2]);

impl<T> PerSide<T> {
    /// Builds a pair from the North and South values.
    pub fn new(north: T, south: T) -> Self {
        PerSide([north, south])
    }

    /// Iterates `(side, value)` pairs in side order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        ALL_SIDES.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        &self.0[side as usize]
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        &mut self.0[side as usize]
    }
}
