use super::{Board, Cell, Player, CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is off the board (expected 0-8)")]
    OutOfRange(usize),

    #[error("cell {0} is already taken")]
    Occupied(usize),

    #[error("the game is already over")]
    GameOver,
}

/// One game: the board plus strict turn alternation and the cached outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state with `first` to move
    pub fn initial(first: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: first,
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of cells claimed so far.
    pub fn move_count(&self) -> usize {
        self.board
            .cells()
            .iter()
            .filter(|&&c| c != Cell::Empty)
            .count()
    }

    /// Get list of legal cells (empty ones), none once the game is over
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_cells()
    }

    /// Place the current player's mark on `index`, then settle the outcome
    /// and pass the turn.
    pub fn apply_move(&mut self, index: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index >= CELLS {
            return Err(MoveError::OutOfRange(index));
        }
        if !self.board.make_move(index, self.current_player) {
            return Err(MoveError::Occupied(index));
        }

        self.outcome = match self.board.check_winner().player() {
            Some(winner) => Some(GameOutcome::Winner(winner)),
            None if self.board.is_full() => Some(GameOutcome::Draw),
            None => None,
        };
        self.current_player = self.current_player.other();

        Ok(())
    }
}
