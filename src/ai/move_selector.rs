use burn::prelude::*;
use rand::Rng;

use crate::ai::network::PolicyNetwork;
use crate::ai::state_encoding::encode_board;
use crate::error::SelectionError;
use crate::game::Board;

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Arg-max of the network's scores over legal cells.
    Network,
    /// Uniform pick among legal cells; the network gave nothing to rank.
    RandomFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMove {
    pub cell: usize,
    pub source: MoveSource,
}

/// Choose a cell for the agent. `rng` is only touched on the fallback path.
pub fn select_move<B: Backend, R: Rng>(
    board: &Board,
    network: &PolicyNetwork<B>,
    rng: &mut R,
) -> Result<SelectedMove, SelectionError> {
    let legal = board.legal_cells();
    if legal.is_empty() {
        return Err(SelectionError::NoLegalMoves);
    }

    if let Some(cell) = best_scored_cell(board, network, &legal) {
        return Ok(SelectedMove {
            cell,
            source: MoveSource::Network,
        });
    }

    log::debug!("network has no usable scores, falling back to a random legal cell");
    Ok(SelectedMove {
        cell: random_legal_cell(&legal, rng),
        source: MoveSource::RandomFallback,
    })
}

/// The network's pick among `legal`, or `None` when it cannot rank them
/// (weights still all zero, or no finite score on a legal cell).
pub fn best_scored_cell<B: Backend>(
    board: &Board,
    network: &PolicyNetwork<B>,
    legal: &[usize],
) -> Option<usize> {
    if !network.is_initialized() {
        return None;
    }
    let scores = network.forward(&encode_board(board));
    log::debug!("cell scores: {scores:.3?}");
    argmax_legal(&scores, legal)
}

/// Highest finite score over `legal`; the first index wins ties.
pub fn argmax_legal(scores: &[f64], legal: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &cell in legal {
        let Some(&score) = scores.get(cell) else {
            continue;
        };
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((cell, score)),
        }
    }
    best.map(|(cell, _)| cell)
}

/// Uniform choice over a non-empty `legal` slice.
pub fn random_legal_cell<R: Rng>(legal: &[usize], rng: &mut R) -> usize {
    legal[rng.random_range(0..legal.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::network::NetworkConfig;
    use crate::game::{Cell, Player};
    use burn::backend::NdArray;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestBackend = NdArray<f64>;

    fn seeded_network(seed: u64) -> PolicyNetwork<TestBackend> {
        let mut rng = StdRng::seed_from_u64(seed);
        NetworkConfig::default().init(&mut rng, &Default::default())
    }

    fn partial_board() -> Board {
        let mut board = Board::new();
        board.make_move(4, Player::Human);
        board.make_move(0, Player::Agent);
        board.make_move(8, Player::Human);
        board
    }

    #[test]
    fn test_argmax_picks_highest_legal() {
        let scores = [0.9, 0.1, 0.5, 0.7, 0.2, 0.3, 0.4, 0.6, 0.8];
        // Cell 0 is best overall but not legal
        assert_eq!(argmax_legal(&scores, &[1, 2, 3, 8]), Some(8));
    }

    #[test]
    fn test_argmax_ties_break_to_lowest_index() {
        let scores = [0.5; 9];
        assert_eq!(argmax_legal(&scores, &[2, 5, 7]), Some(2));
    }

    #[test]
    fn test_argmax_skips_non_finite_scores() {
        let mut scores = [0.1; 9];
        scores[3] = f64::NAN;
        scores[5] = 0.2;
        assert_eq!(argmax_legal(&scores, &[3, 5]), Some(5));
        assert_eq!(argmax_legal(&scores, &[3]), None);
        assert_eq!(argmax_legal(&scores, &[]), None);
    }

    #[test]
    fn test_select_move_never_picks_occupied_cell() {
        let network = seeded_network(13);
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::new();
        let mut player = Player::Human;

        while !board.is_full() {
            let selected = select_move(&board, &network, &mut rng).unwrap();
            assert_eq!(board.get(selected.cell), Cell::Empty);
            assert_eq!(selected.source, MoveSource::Network);
            assert!(board.make_move(selected.cell, player));
            player = player.other();
        }
    }

    #[test]
    fn test_select_move_is_deterministic() {
        let network = seeded_network(17);
        let board = partial_board();
        let first = select_move(&board, &network, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = select_move(&board, &network, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_move_matches_network_argmax() {
        let network = seeded_network(23);
        let board = partial_board();
        let scores = network.forward(&encode_board(&board));
        let legal = board.legal_cells();
        let expected = legal
            .iter()
            .copied()
            .fold(None::<usize>, |best, c| match best {
                Some(b) if scores[b] >= scores[c] => Some(b),
                _ => Some(c),
            })
            .unwrap();

        let selected = select_move(&board, &network, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(selected.cell, expected);
    }

    #[test]
    fn test_zeroed_network_triggers_random_fallback() {
        let network = PolicyNetwork::<TestBackend>::zeroed(10, 0.1, &Default::default());
        let board = partial_board();
        let legal = board.legal_cells();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let selected = select_move(&board, &network, &mut rng).unwrap();
            assert_eq!(selected.source, MoveSource::RandomFallback);
            assert!(legal.contains(&selected.cell));
        }
    }

    #[test]
    fn test_fallback_reproducible_with_same_seed() {
        let network = PolicyNetwork::<TestBackend>::zeroed(4, 0.1, &Default::default());
        let board = Board::new();
        let a = select_move(&board, &network, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = select_move(&board, &network, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_covers_all_legal_cells() {
        let legal = [1, 3, 6];
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 9];
        for _ in 0..200 {
            seen[random_legal_cell(&legal, &mut rng)] = true;
        }
        assert!(legal.iter().all(|&c| seen[c]));
        assert_eq!(seen.iter().filter(|&&s| s).count(), legal.len());
    }

    #[test]
    fn test_full_board_is_an_error() {
        let network = seeded_network(1);
        let board = Board::from_cells([
            Cell::Human,
            Cell::Agent,
            Cell::Human,
            Cell::Human,
            Cell::Agent,
            Cell::Agent,
            Cell::Agent,
            Cell::Human,
            Cell::Human,
        ]);
        let result = select_move(&board, &network, &mut StdRng::seed_from_u64(0));
        assert_eq!(result, Err(SelectionError::NoLegalMoves));
    }
}
