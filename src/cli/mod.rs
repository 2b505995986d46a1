//! Text front end: board rendering, move prompt, and the game loop that
//! alternates human input with agent moves.

pub mod prompt;
pub mod render;
pub mod session;

pub use session::{play_game, run_session, GameEnd, PlayConfig, SessionStats};
