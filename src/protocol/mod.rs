//! Text protocol handling.
//!
//! This module implements the board notation used to save and load
//! positions, and the command parser for the engine's main loop.

pub mod fen;
pub mod parser;

pub use fen::{decode_board, encode_board, parse_fen, FenError, SEPARATOR};
pub use parser::{parse_command, CellRef, Command};
