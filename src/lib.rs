//! Kriegspiel engine library.
//!
//! Exposes the board representation, supply and combat calculations, the
//! turn rules, move generation and the text protocol for use by integration
//! tests and the binary entry points.

pub mod board;
pub mod combat;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod scenario;
pub mod selfplay;
pub mod supply;
