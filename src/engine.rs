//! Engine state management.
//!
//! Holds the current game, the engine options and the random source used by
//! `go`, and turns each protocol command into a response line.

use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{CellId, GameState, Side, Stronghold, Unit};
use crate::combat::{battle_factor, Stance};
use crate::error::CommandError;
use crate::movegen::{legal_commands, random_action, supplied_destinations};
use crate::protocol::fen::encode_board;
use crate::protocol::parser::CellRef;
use crate::scenario::{default_scenario, scenario, Scenario, SCENARIOS};

/// Options settable with `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Seed for `go`; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Name of the scenario loaded at start-up.
    pub scenario: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            seed: None,
            scenario: default_scenario().name.to_string(),
        }
    }
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: GameState,
    pub options: EngineOptions,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with the default scenario loaded.
    pub fn new() -> Self {
        Engine {
            state: start_scenario(default_scenario()),
            options: EngineOptions::default(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Handles `setoption`. Unknown names and unreadable values are logged
    /// and ignored.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) {
        match name.to_ascii_lowercase().as_str() {
            "seed" => match value.map(str::parse::<u64>) {
                Some(Ok(seed)) => {
                    self.options.seed = Some(seed);
                    self.rng = SmallRng::seed_from_u64(seed);
                }
                None => {
                    self.options.seed = None;
                    self.rng = SmallRng::from_entropy();
                }
                Some(Err(_)) => warn!("invalid Seed value: {value:?}"),
            },
            "scenario" => match value.and_then(scenario) {
                Some(s) => {
                    self.options.scenario = s.name.to_string();
                    self.state = start_scenario(s);
                }
                None => warn!("unknown scenario: {value:?}"),
            },
            other => warn!("unknown option: {other}"),
        }
    }

    /// Handles `isready`.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `scenarios`: one line per built-in scenario.
    pub fn handle_scenarios<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for s in &SCENARIOS {
            writeln!(out, "scenario {}", s.name)?;
        }
        out.flush()
    }

    /// Handles `scenario <name>`.
    pub fn handle_scenario<W: Write>(&mut self, name: &str, out: &mut W) -> io::Result<()> {
        match scenario(name) {
            Some(s) => {
                self.state = start_scenario(s);
                writeln!(out, "ok")?;
            }
            None => writeln!(out, "rejected unknown scenario '{name}'")?,
        }
        out.flush()
    }

    /// Handles `position <fen>`.
    pub fn handle_position<W: Write>(&mut self, fen: &str, out: &mut W) -> io::Result<()> {
        let result = self.state.load(fen);
        self.respond(result, out)
    }

    /// Handles `merge <fen>`.
    pub fn handle_merge<W: Write>(&mut self, fen: &str, out: &mut W) -> io::Result<()> {
        let result = self.state.merge_pieces(fen);
        self.respond(result, out)
    }

    /// Handles `move <cell> <cell>`.
    pub fn handle_move<W: Write>(&mut self, from: CellRef, to: CellRef, out: &mut W) -> io::Result<()> {
        let result = match (self.resolve(from), self.resolve(to)) {
            (Ok(from), Ok(to)) => self.state.move_piece(from, to),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        self.respond(result, out)
    }

    /// Handles `attack <cell>`.
    pub fn handle_attack<W: Write>(&mut self, target: CellRef, out: &mut W) -> io::Result<()> {
        let result = self
            .resolve(target)
            .and_then(|target| self.state.attack(target))
            .map(|_| ());
        self.respond(result, out)
    }

    /// Handles `endturn`.
    pub fn handle_endturn<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let result = self.state.end_turn();
        self.respond(result, out)
    }

    /// Handles `edit unit <cell> <token|->`.
    pub fn handle_edit_unit<W: Write>(&mut self, cell: CellRef, unit: Option<Unit>, out: &mut W) -> io::Result<()> {
        let result = self
            .resolve(cell)
            .and_then(|cell| self.state.edit_cell(cell, unit));
        self.respond(result, out)
    }

    /// Handles `edit stronghold <cell> <token|->`.
    pub fn handle_edit_stronghold<W: Write>(
        &mut self,
        cell: CellRef,
        stronghold: Option<Stronghold>,
        out: &mut W,
    ) -> io::Result<()> {
        let result = self
            .resolve(cell)
            .and_then(|cell| self.state.edit_stronghold(cell, stronghold));
        self.respond(result, out)
    }

    /// Handles `fen`.
    pub fn handle_fen<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "fen {}", encode_board(&self.state.board))?;
        out.flush()
    }

    /// Handles `state`: the whole game state as one line of JSON.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(&self.state).map_err(io::Error::other)?;
        writeln!(out, "{json}")?;
        out.flush()
    }

    /// Handles `legal`: one `action` line per legal action.
    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for action in legal_commands(&self.state) {
            writeln!(out, "action {action}")?;
        }
        out.flush()
    }

    /// Handles `factor <cell>`: both sides' offense and defense there.
    pub fn handle_factor<W: Write>(&self, cell: CellRef, out: &mut W) -> io::Result<()> {
        let id = match self.resolve(cell) {
            Ok(id) => id,
            Err(e) => return self.respond(Err(e), out),
        };
        let board = &self.state.board;
        let factor = |side: Side, stance: Stance| battle_factor(board, side, stance, id).value;
        writeln!(
            out,
            "factor {id} offense {} {} defense {} {}",
            factor(Side::North, Stance::Offense),
            factor(Side::South, Stance::Offense),
            factor(Side::North, Stance::Defense),
            factor(Side::South, Stance::Defense),
        )?;
        out.flush()
    }

    /// Handles `predict <cell>`: destinations where the unit there would
    /// still be supplied.
    pub fn handle_predict<W: Write>(&self, cell: CellRef, out: &mut W) -> io::Result<()> {
        let id = match self.resolve(cell) {
            Ok(id) if self.state.board.unit(id).is_some() => id,
            Ok(id) => return self.respond(Err(CommandError::NoUnit(id)), out),
            Err(e) => return self.respond(Err(e), out),
        };
        write!(out, "predict {id}")?;
        for dest in supplied_destinations(&self.state, id) {
            write!(out, " {dest}")?;
        }
        writeln!(out)?;
        out.flush()
    }

    /// Handles `go`: plays one random legal action for the side to move.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(action) = random_action(&self.state, &mut self.rng) else {
            return self.respond(Err(CommandError::GameOver), out);
        };
        writeln!(out, "action {action}")?;
        let result = self.state.apply(action);
        self.respond(result, out)
    }

    fn resolve(&self, cell: CellRef) -> Result<CellId, CommandError> {
        let size = self.state.board.size;
        cell.resolve(size).ok_or(match cell {
            CellRef::Id(id) => CommandError::OffBoard(id),
            CellRef::Coord { .. } => CommandError::OffBoard(size.cell_count()),
        })
    }

    /// Writes `ok` or `rejected <reason>`, then `winner <side>` once the
    /// game is decided.
    fn respond<W: Write>(&self, result: Result<(), CommandError>, out: &mut W) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(out, "ok")?,
            Err(e) => writeln!(out, "rejected {e}")?,
        }
        if let Some(outcome) = self.state.outcome {
            writeln!(out, "winner {}", outcome.winner)?;
        }
        out.flush()
    }
}

fn start_scenario(s: &Scenario) -> GameState {
    match s.board() {
        Ok(board) => {
            info!("starting scenario '{}'", s.name);
            GameState::start(board)
        }
        Err(e) => {
            warn!("scenario '{}' does not decode: {e}", s.name);
            GameState::start(Default::default())
        }
    }
}
