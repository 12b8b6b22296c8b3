//! Board notation encoding and decoding.
//!
//! A position is written cell by cell in row-major order between `|`
//! separators. Runs of empty cells collapse into a decimal count; every
//! other cell is an occupant token:
//!
//! - `<unit>.<side>` for a unit alone, e.g. `💂.0`
//! - `<stronghold>[.<side>]` for a stronghold alone, e.g. `🏰` or `🎪.1`
//! - `<unit>.<side>/<stronghold>[.<side>]` for both, e.g. `💂.0/🛣️.0`
//!
//! Sides are `0` (North) and `1` (South). Trailing empty cells are omitted,
//! so an empty board is `||`.
//!
//! Decoding is lenient: an empty token counts as zero cells, and a token
//! that does not parse still takes up a cell but places nothing. The only
//! hard error is an occupant that falls past the end of the board.

use crate::board::{Board, BoardSize, CellId, Side, Stronghold, StrongholdKind, Unit, UnitKind};

/// Token separator.
pub const SEPARATOR: char = '|';

/// Separates the unit part from the stronghold part of a token.
const LAYER_SEPARATOR: char = '/';

/// Separates a symbol from its side.
const SIDE_SEPARATOR: char = '.';

/// Errors that can occur while decoding a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("token '{token}' lands on cell {cell}, past the {capacity} cells of the board")]
    Overflow {
        token: String,
        cell: usize,
        capacity: usize,
    },
}

/// Encodes a unit as `<symbol>.<side>`.
pub fn encode_unit(unit: &Unit) -> String {
    format!("{}{}{}", unit.kind.symbol(), SIDE_SEPARATOR, unit.side.fen_char())
}

/// Encodes a stronghold as `<symbol>` or `<symbol>.<side>` when owned.
pub fn encode_stronghold(stronghold: &Stronghold) -> String {
    match stronghold.owner {
        Some(side) => format!("{}{}{}", stronghold.kind.symbol(), SIDE_SEPARATOR, side.fen_char()),
        None => stronghold.kind.symbol().to_string(),
    }
}

/// Encodes the occupants of one cell, or `None` if the cell is empty.
pub fn encode_cell(unit: Option<&Unit>, stronghold: Option<&Stronghold>) -> Option<String> {
    match (unit, stronghold) {
        (Some(u), Some(s)) => Some(format!(
            "{}{}{}",
            encode_unit(u),
            LAYER_SEPARATOR,
            encode_stronghold(s)
        )),
        (Some(u), None) => Some(encode_unit(u)),
        (None, Some(s)) => Some(encode_stronghold(s)),
        (None, None) => None,
    }
}

/// Encodes the whole board.
pub fn encode_board(board: &Board) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut empty_run = 0usize;

    for id in 0..board.len() {
        match encode_cell(board.unit(id), board.stronghold(id)) {
            Some(token) => {
                if empty_run > 0 {
                    tokens.push(empty_run.to_string());
                    empty_run = 0;
                }
                tokens.push(token);
            }
            None => empty_run += 1,
        }
    }

    let separator = SEPARATOR.to_string();
    let mut out = separator.clone();
    out.push_str(&tokens.join(&separator));
    out.push(SEPARATOR);
    out
}

/// Splits a `<symbol>.<side>` part at its first side separator.
fn split_side(part: &str) -> (&str, Option<&str>) {
    match part.split_once(SIDE_SEPARATOR) {
        Some((symbol, side)) => (symbol, Some(side)),
        None => (part, None),
    }
}

/// Decodes `<symbol>.<side>`. The side is mandatory.
pub fn decode_unit(part: &str) -> Option<Unit> {
    let (symbol, side) = split_side(part);
    let kind = UnitKind::from_symbol(symbol)?;
    let side = single_char(side?).and_then(Side::from_fen_char)?;
    Some(Unit::new(kind, side))
}

/// Decodes `<symbol>[.<side>]`. An unreadable side leaves it unowned.
pub fn decode_stronghold(part: &str) -> Option<Stronghold> {
    let (symbol, side) = split_side(part);
    let kind = StrongholdKind::from_symbol(symbol)?;
    let owner = side.and_then(single_char).and_then(Side::from_fen_char);
    Some(Stronghold::new(kind, owner))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Decodes the unit layer of a token: its first `/` segment.
pub fn decode_token_unit(token: &str) -> Option<Unit> {
    token.split(LAYER_SEPARATOR).next().and_then(decode_unit)
}

/// Decodes the stronghold layer of a token: its last `/` segment.
pub fn decode_token_stronghold(token: &str) -> Option<Stronghold> {
    token.split(LAYER_SEPARATOR).last().and_then(decode_stronghold)
}

/// Returns the number of empty cells a token stands for, if it is a count.
fn run_length(token: &str) -> Option<usize> {
    if token.is_empty() {
        return Some(0);
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse().unwrap_or(usize::MAX))
}

/// Walks the tokens of a position, calling `place` with the cell and token
/// of every occupant that decodes to something.
fn walk<F>(fen: &str, size: BoardSize, mut place: F) -> Result<(), FenError>
where
    F: FnMut(CellId, &str),
{
    let capacity = size.cell_count();
    let mut cursor = 0usize;

    for token in fen.split(SEPARATOR) {
        if let Some(run) = run_length(token) {
            cursor = cursor.saturating_add(run);
            continue;
        }
        let occupied = decode_token_unit(token).is_some() || decode_token_stronghold(token).is_some();
        if occupied {
            if cursor >= capacity {
                return Err(FenError::Overflow {
                    token: token.to_string(),
                    cell: cursor,
                    capacity,
                });
            }
            place(cursor, token);
        }
        cursor = cursor.saturating_add(1);
    }

    Ok(())
}

/// Decodes a position onto an empty board of the given size.
pub fn decode_board(fen: &str, size: BoardSize) -> Result<Board, FenError> {
    let mut board = Board::empty(size);
    walk(fen, size, |id, token| {
        board.set_unit(id, decode_token_unit(token));
        board.set_stronghold(id, decode_token_stronghold(token));
    })?;
    Ok(board)
}

/// Decodes a position onto a default-sized board.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    decode_board(fen, BoardSize::default())
}

/// Decodes only the unit layer of a position, one slot per cell.
pub fn decode_units(fen: &str, size: BoardSize) -> Result<Vec<Option<Unit>>, FenError> {
    let mut units = vec![None; size.cell_count()];
    walk(fen, size, |id, token| units[id] = decode_token_unit(token))?;
    Ok(units)
}
