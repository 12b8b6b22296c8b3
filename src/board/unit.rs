//! Unit catalog and unit instances.
//!
//! Each unit kind carries fixed combat and movement stats. The two "swift"
//! kinds share the rules of their base kind but move two steps per turn.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// The kind of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Infantry,
    Cavalry,
    Artillery,
    SwiftArtillery,
    Relay,
    SwiftRelay,
}

/// All unit kinds in catalog order.
pub const ALL_UNIT_KINDS: [UnitKind; 6] = [
    UnitKind::Infantry,
    UnitKind::Cavalry,
    UnitKind::Artillery,
    UnitKind::SwiftArtillery,
    UnitKind::Relay,
    UnitKind::SwiftRelay,
];

/// Fixed stats for a unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Movement steps per turn.
    pub speed: usize,
    /// Weapon range in Chebyshev distance.
    pub range: usize,
    pub offense: i32,
    pub defense: i32,
    /// Whether the unit garrisons strongholds (adds their bonus, claims them).
    pub can_add_defense: bool,
}

impl UnitKind {
    /// Returns the fixed stats for this kind.
    pub const fn stats(self) -> UnitStats {
        match self {
            UnitKind::Infantry => UnitStats {
                speed: 1,
                range: 2,
                offense: 4,
                defense: 6,
                can_add_defense: true,
            },
            UnitKind::Cavalry => UnitStats {
                speed: 2,
                range: 2,
                offense: 4,
                defense: 5,
                can_add_defense: false,
            },
            UnitKind::Artillery => UnitStats {
                speed: 1,
                range: 3,
                offense: 5,
                defense: 8,
                can_add_defense: true,
            },
            UnitKind::SwiftArtillery => UnitStats {
                speed: 2,
                range: 3,
                offense: 5,
                defense: 8,
                can_add_defense: true,
            },
            UnitKind::Relay => UnitStats {
                speed: 1,
                range: 0,
                offense: 0,
                defense: 1,
                can_add_defense: false,
            },
            UnitKind::SwiftRelay => UnitStats {
                speed: 2,
                range: 0,
                offense: 0,
                defense: 1,
                can_add_defense: false,
            },
        }
    }

    /// Returns true for kinds that extend the supply network.
    pub const fn is_relay(self) -> bool {
        matches!(self, UnitKind::Relay | UnitKind::SwiftRelay)
    }

    /// Returns true for kinds that can charge.
    pub const fn is_cavalry(self) -> bool {
        matches!(self, UnitKind::Cavalry)
    }

    /// Returns the board notation symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            UnitKind::Infantry => "💂",
            UnitKind::Cavalry => "🏇",
            UnitKind::Artillery => "🎉",
            UnitKind::SwiftArtillery => "🚀",
            UnitKind::Relay => "🚩",
            UnitKind::SwiftRelay => "🚚",
        }
    }

    /// Parses a unit kind from its board notation symbol.
    pub fn from_symbol(s: &str) -> Option<UnitKind> {
        ALL_UNIT_KINDS.into_iter().find(|k| k.symbol() == s)
    }
}

/// A unit on the board.
///
/// `supplied` is derived state: it is only ever written by the supply
/// recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    pub side: Side,
    pub supplied: bool,
    pub retreating: bool,
}

impl Unit {
    /// Creates a fresh unit. New units count as supplied until the next
    /// recomputation says otherwise.
    pub const fn new(kind: UnitKind, side: Side) -> Self {
        Unit {
            kind,
            side,
            supplied: true,
            retreating: false,
        }
    }

    pub const fn stats(&self) -> UnitStats {
        self.kind.stats()
    }

    pub const fn offense(&self) -> i32 {
        self.kind.stats().offense
    }

    pub const fn defense(&self) -> i32 {
        self.kind.stats().defense
    }
}
