use super::Player;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

/// Every three-in-a-row: rows, then columns, then the two diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Agent,
}

impl Cell {
    /// Numeric value fed to the policy network.
    pub fn value(self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Human => 1.0,
            Cell::Agent => -1.0,
        }
    }

    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Agent => Some(Player::Agent),
        }
    }
}

/// Row-major 3x3 grid. Index 0-2 is the top row, 6-8 the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Build a board from explicit cell contents.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    /// Get the cell at `index`. Panics if `index >= CELLS`.
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Claim `index` for `player`. Returns false (and leaves the board
    /// untouched) when the index is off the board or already taken.
    pub fn make_move(&mut self, index: usize, player: Player) -> bool {
        if !self.is_legal(index) {
            return false;
        }
        self.cells[index] = player.to_cell();
        true
    }

    /// True iff `index` is on the board and empty.
    pub fn is_legal(&self, index: usize) -> bool {
        index < CELLS && self.cells[index] == Cell::Empty
    }

    /// Indices of all empty cells, ascending.
    pub fn legal_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// The owner of the first completed line, or `Cell::Empty` if none.
    pub fn check_winner(&self) -> Cell {
        for [a, b, c] in LINES {
            let cell = self.cells[a];
            if cell != Cell::Empty && cell == self.cells[b] && cell == self.cells[c] {
                return cell;
            }
        }
        Cell::Empty
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
