//! Text command parser.
//!
//! Parses one line of the engine's text protocol into a structured
//! `Command` the main loop can dispatch on.

use log::warn;

use crate::board::{BoardSize, CellId, Stronghold, Unit};

use super::fen::{decode_stronghold, decode_unit};

/// A cell named on the command line, either by id or as `x,y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef {
    Id(CellId),
    Coord { x: i32, y: i32 },
}

impl CellRef {
    /// Parses `17` or `3,4`.
    pub fn parse(s: &str) -> Option<CellRef> {
        match s.split_once(',') {
            Some((x, y)) => Some(CellRef::Coord {
                x: x.trim().parse().ok()?,
                y: y.trim().parse().ok()?,
            }),
            None => s.parse().ok().map(CellRef::Id),
        }
    }

    /// Resolves to a cell id on a board of the given size.
    pub fn resolve(self, size: BoardSize) -> Option<CellId> {
        match self {
            CellRef::Id(id) if size.contains(id) => Some(id),
            CellRef::Id(_) => None,
            CellRef::Coord { x, y } => size.cell_at(x, y),
        }
    }
}

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a named scenario: `scenario <name>`.
    Scenario { name: String },

    /// List the available scenarios.
    Scenarios,

    /// Load a position from board notation.
    Position { fen: String },

    /// Overlay the units of a position onto the board.
    Merge { fen: String },

    /// Move a unit: `move <cell> <cell>`.
    Move { from: CellRef, to: CellRef },

    /// Attack a cell: `attack <cell>`.
    Attack { target: CellRef },

    /// Finish the side to move's turn.
    EndTurn,

    /// Place or clear a unit: `edit unit <cell> <token|->`.
    EditUnit { cell: CellRef, unit: Option<Unit> },

    /// Place or clear a stronghold: `edit stronghold <cell> <token|->`.
    EditStronghold {
        cell: CellRef,
        stronghold: Option<Stronghold>,
    },

    /// Print the position in board notation.
    Fen,

    /// Print the full state as JSON.
    State,

    /// List the legal actions of the side to move.
    Legal,

    /// Print both sides' battle factors at a cell.
    Factor { cell: CellRef },

    /// List where the unit at a cell could move and stay supplied.
    Predict { cell: CellRef },

    /// Play one random legal action.
    Go,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Synchronization ping; the engine replies `readyok`.
    IsReady,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "scenarios" => Some(Command::Scenarios),
        "endturn" => Some(Command::EndTurn),
        "fen" => Some(Command::Fen),
        "state" => Some(Command::State),
        "legal" => Some(Command::Legal),
        "go" => Some(Command::Go),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),

        "scenario" => parse_scenario(args),
        "position" => parse_fen_arg(args, "position").map(|fen| Command::Position { fen }),
        "merge" => parse_fen_arg(args, "merge").map(|fen| Command::Merge { fen }),
        "move" => parse_move(args),
        "attack" => parse_single_cell(args, "attack").map(|target| Command::Attack { target }),
        "factor" => parse_single_cell(args, "factor").map(|cell| Command::Factor { cell }),
        "predict" => parse_single_cell(args, "predict").map(|cell| Command::Predict { cell }),
        "edit" => parse_edit(args),
        "setoption" => parse_setoption(args),

        other => {
            warn!("unknown command: {other}");
            None
        }
    }
}

fn parse_cell(s: &str) -> Option<CellRef> {
    let cell = CellRef::parse(s);
    if cell.is_none() {
        warn!("invalid cell: '{s}'");
    }
    cell
}

/// Parses `scenario <name>`; the name may contain spaces.
fn parse_scenario(args: &[&str]) -> Option<Command> {
    if args.is_empty() {
        warn!("malformed scenario: expected 'scenario <name>'");
        return None;
    }
    Some(Command::Scenario {
        name: args.join(" "),
    })
}

/// Board notation is a single token with no spaces.
fn parse_fen_arg(args: &[&str], command: &str) -> Option<String> {
    match args {
        [fen] => Some(fen.to_string()),
        _ => {
            warn!("malformed {command}: expected '{command} <fen>'");
            None
        }
    }
}

/// Parses `move <cell> <cell>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    let [from, to] = args else {
        warn!("malformed move: expected 'move <cell> <cell>'");
        return None;
    };
    Some(Command::Move {
        from: parse_cell(from)?,
        to: parse_cell(to)?,
    })
}

fn parse_single_cell(args: &[&str], command: &str) -> Option<CellRef> {
    let [cell] = args else {
        warn!("malformed {command}: expected '{command} <cell>'");
        return None;
    };
    parse_cell(cell)
}

/// Parses `edit unit <cell> <token|->` and `edit stronghold <cell> <token|->`.
fn parse_edit(args: &[&str]) -> Option<Command> {
    let [layer, cell, token] = args else {
        warn!("malformed edit: expected 'edit <unit|stronghold> <cell> <token|->'");
        return None;
    };
    let cell = parse_cell(cell)?;
    let clear = *token == "-";

    match *layer {
        "unit" => {
            let unit = if clear {
                None
            } else {
                Some(decode_unit(token).or_else(|| invalid_token(token))?)
            };
            Some(Command::EditUnit { cell, unit })
        }
        "stronghold" => {
            let stronghold = if clear {
                None
            } else {
                Some(decode_stronghold(token).or_else(|| invalid_token(token))?)
            };
            Some(Command::EditStronghold { cell, stronghold })
        }
        other => {
            warn!("unknown edit layer: '{other}'");
            None
        }
    }
}

fn invalid_token<T>(token: &str) -> Option<T> {
    warn!("invalid piece token: '{token}'");
    None
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let rest = &args[1..];

    let (name, value) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => {
            let name_parts = &rest[..vi];
            let value_parts = &rest[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (rest.join(" "), None),
    };

    Some(Command::SetOption { name, value })
}
