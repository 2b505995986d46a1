use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Agent,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Human => Player::Agent,
            Player::Agent => Player::Human,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Agent => Cell::Agent,
        }
    }

    /// Board symbol used by the text renderer.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Agent => 'O',
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "Human",
            Player::Agent => "Agent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Human.other(), Player::Agent);
        assert_eq!(Player::Agent.other(), Player::Human);
    }

    #[test]
    fn test_cell_round_trip() {
        for player in [Player::Human, Player::Agent] {
            assert_eq!(player.to_cell().player(), Some(player));
        }
        assert_eq!(Cell::Empty.player(), None);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Human.name(), "Human");
        assert_eq!(Player::Agent.name(), "Agent");
    }
}
