use crate::error::{NetworkError, SelectionError};
use crate::game::{Board, GameOutcome};

/// Universal interface for all AI players.
pub trait Agent {
    /// Select a cell to claim on `board`. Errors only when no cell is free.
    fn select_action(&mut self, board: &Board) -> Result<usize, SelectionError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Called once when a game the agent took part in has ended. Learning
    /// agents train here and return the mean loss of the update, if any.
    fn observe_outcome(&mut self, _outcome: GameOutcome) -> Result<Option<f64>, NetworkError> {
        Ok(None)
    }
}
