//! Fixed terrain: arsenals, fortresses, passes and mountains.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// The kind of a stronghold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrongholdKind {
    Arsenal,
    Fortress,
    Pass,
    Mountain,
}

/// All stronghold kinds in catalog order.
pub const ALL_STRONGHOLD_KINDS: [StrongholdKind; 4] = [
    StrongholdKind::Arsenal,
    StrongholdKind::Fortress,
    StrongholdKind::Pass,
    StrongholdKind::Mountain,
];

impl StrongholdKind {
    /// Defense added to a garrisoning unit.
    pub const fn defense_bonus(self) -> i32 {
        match self {
            StrongholdKind::Arsenal => 0,
            StrongholdKind::Fortress => 4,
            StrongholdKind::Pass => 2,
            StrongholdKind::Mountain => 0,
        }
    }

    /// Returns the board notation symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            StrongholdKind::Arsenal => "🎪",
            StrongholdKind::Fortress => "🏰",
            StrongholdKind::Pass => "🛣️",
            StrongholdKind::Mountain => "⛰️",
        }
    }

    /// Parses a stronghold kind from its board notation symbol.
    pub fn from_symbol(s: &str) -> Option<StrongholdKind> {
        ALL_STRONGHOLD_KINDS.into_iter().find(|k| k.symbol() == s)
    }
}

/// A stronghold on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stronghold {
    pub kind: StrongholdKind,
    pub owner: Option<Side>,
}

impl Stronghold {
    pub const fn new(kind: StrongholdKind, owner: Option<Side>) -> Self {
        Stronghold { kind, owner }
    }

    /// Creates an ownerless stronghold.
    pub const fn neutral(kind: StrongholdKind) -> Self {
        Stronghold { kind, owner: None }
    }

    pub const fn is_mountain(&self) -> bool {
        matches!(self.kind, StrongholdKind::Mountain)
    }

    pub fn is_arsenal_of(&self, side: Side) -> bool {
        self.kind == StrongholdKind::Arsenal && self.owner == Some(side)
    }
}
