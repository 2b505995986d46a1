//! Tic-tac-toe game logic: board representation, player types, and the
//! turn-alternating game state.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, CELLS, SIDE};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError};
