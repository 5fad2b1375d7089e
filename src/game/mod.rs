//! Core Connect Four game logic: board representation, player types, and the
//! game session that the outer loops drive.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, COLS, ROWS, WINDOW};
pub use player::Player;
pub use state::{GameOutcome, GameState};
