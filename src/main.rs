//! Kriegspiel -- a Game of War engine speaking a line-based text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `env_logger` (set `RUST_LOG`).

use std::io::{self, BufRead, Write};

use kriegspiel::engine::Engine;
use kriegspiel::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(&name, value.as_deref()),
            Command::Scenarios => engine.handle_scenarios(&mut out)?,
            Command::Scenario { name } => engine.handle_scenario(&name, &mut out)?,
            Command::Position { fen } => engine.handle_position(&fen, &mut out)?,
            Command::Merge { fen } => engine.handle_merge(&fen, &mut out)?,
            Command::Move { from, to } => engine.handle_move(from, to, &mut out)?,
            Command::Attack { target } => engine.handle_attack(target, &mut out)?,
            Command::EndTurn => engine.handle_endturn(&mut out)?,
            Command::EditUnit { cell, unit } => engine.handle_edit_unit(cell, unit, &mut out)?,
            Command::EditStronghold { cell, stronghold } => {
                engine.handle_edit_stronghold(cell, stronghold, &mut out)?
            }
            Command::Fen => engine.handle_fen(&mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::Factor { cell } => engine.handle_factor(cell, &mut out)?,
            Command::Predict { cell } => engine.handle_predict(cell, &mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }

    out.flush()
}
