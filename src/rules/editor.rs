//! Position editing: loading, merging and hand-placing pieces.
//!
//! Editing is allowed at any time, including after the game has ended. Every
//! edit judges the outcome afresh, so restoring a lost arsenal resumes play.

use log::info;

use crate::board::{CellId, GameState, Stronghold, Unit};
use crate::error::CommandError;
use crate::protocol::fen::{decode_board, decode_units};

impl GameState {
    /// Replaces the position with a decoded one.
    ///
    /// Turn records, retreats and the outcome start fresh; the side to move
    /// and the turn counter are kept.
    pub fn load(&mut self, fen: &str) -> Result<(), CommandError> {
        let board = decode_board(fen, self.board.size)?;
        let (current, turn) = (self.current, self.turn);
        *self = GameState::from_board(board);
        self.current = current;
        self.turn = turn;
        self.refresh();
        info!("loaded position, {} to move", self.current);
        Ok(())
    }

    /// Overlays the units of a decoded position onto the current board.
    ///
    /// Cells the overlay leaves empty keep their current unit; strongholds
    /// are untouched.
    pub fn merge_pieces(&mut self, fen: &str) -> Result<(), CommandError> {
        let overlay = decode_units(fen, self.board.size)?;
        for (id, unit) in overlay.into_iter().enumerate() {
            if unit.is_some() {
                self.board.set_unit(id, unit);
            }
        }
        self.refresh_after_edit();
        Ok(())
    }

    /// Places or clears a unit by hand.
    pub fn edit_cell(&mut self, cell: CellId, unit: Option<Unit>) -> Result<(), CommandError> {
        if !self.board.set_unit(cell, unit) {
            return Err(CommandError::OffBoard(cell));
        }
        self.refresh_after_edit();
        Ok(())
    }

    /// Places or clears a stronghold by hand.
    pub fn edit_stronghold(&mut self, cell: CellId, stronghold: Option<Stronghold>) -> Result<(), CommandError> {
        if !self.board.set_stronghold(cell, stronghold) {
            return Err(CommandError::OffBoard(cell));
        }
        self.refresh_after_edit();
        Ok(())
    }

    fn refresh_after_edit(&mut self) {
        self.outcome = None;
        self.refresh();
    }
}
