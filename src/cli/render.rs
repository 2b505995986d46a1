use crate::game::{Board, Cell, GameOutcome, Player, SIDE};

/// Three cells per line: ` X ` for the human, ` O ` for the agent, ` # ` for empty.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(board.cells().len() * 3 + SIDE);
    for (i, cell) in board.cells().iter().enumerate() {
        let symbol = match cell {
            Cell::Empty => '#',
            Cell::Human => Player::Human.symbol(),
            Cell::Agent => Player::Agent.symbol(),
        };
        out.push(' ');
        out.push(symbol);
        out.push(' ');
        if i % SIDE == SIDE - 1 {
            out.push('\n');
        }
    }
    out
}

/// The line printed once a game is over.
pub fn announcement(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Winner(Player::Human) => "Human Rules!!",
        GameOutcome::Winner(Player::Agent) => "AI Is Coming Baby!!",
        GameOutcome::Draw => "It's a draw!",
    }
}
