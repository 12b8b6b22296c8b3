//! The turn state machine.
//!
//! All mutation of a [`GameState`](crate::board::GameState) goes through the
//! methods defined here: the play commands in [`turn`], position editing in
//! [`editor`], and the recomputation pass in [`update`] that follows every
//! one of them.

pub mod editor;
pub mod turn;
pub mod update;
