//! Turn actions available to the side to move.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::CellId;

/// A single step of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the unit at `from` to `to`.
    Move { from: CellId, to: CellId },

    /// Attack the enemy unit at `target`.
    Attack { target: CellId },

    /// Finish the turn and hand play to the opponent.
    EndTurn,
}

/// Formats the action as the protocol command that performs it.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { from, to } => write!(f, "move {from} {to}"),
            Action::Attack { target } => write!(f, "attack {target}"),
            Action::EndTurn => f.write_str("endturn"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_distinct() {
        assert_ne!(Action::Move { from: 1, to: 2 }, Action::Move { from: 2, to: 1 });
        assert_ne!(Action::Attack { target: 1 }, Action::EndTurn);
    }

    #[test]
    fn actions_display_as_commands() {
        assert_eq!(Action::Move { from: 3, to: 29 }.to_string(), "move 3 29");
        assert_eq!(Action::Attack { target: 7 }.to_string(), "attack 7");
        assert_eq!(Action::EndTurn.to_string(), "endturn");
    }

    #[test]
    fn actions_serialize_with_variant_names() {
        let json = serde_json::to_string(&Action::Attack { target: 7 }).unwrap();
        assert_eq!(json, r#"{"Attack":{"target":7}}"#);
    }
}
