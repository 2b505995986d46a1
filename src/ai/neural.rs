use burn::backend::NdArray;
use burn::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::agent::Agent;
use crate::ai::move_selector::{select_move, MoveSource};
use crate::ai::network::{NetworkConfig, PolicyNetwork};
use crate::ai::state_encoding::encode_board;
use crate::error::{NetworkError, SelectionError};
use crate::game::{Board, GameOutcome};
use crate::training::reward::{chosen_cell_target, target_for, MoveRecord, RewardTargets};

pub type InferBackend = NdArray<f64>;

/// The network-driven player. Always plays the `Agent` side.
///
/// While learning is enabled every move is recorded; [`Agent::observe_outcome`]
/// turns the game's moves into samples and trains on them, then forgets them.
pub struct NeuralAgent<B: Backend = InferBackend> {
    network: PolicyNetwork<B>,
    rng: StdRng,
    targets: RewardTargets,
    history: Vec<MoveRecord>,
    learning: bool,
    last_source: Option<MoveSource>,
}

impl<B: Backend> NeuralAgent<B> {
    pub fn new(network: PolicyNetwork<B>, rng: StdRng, targets: RewardTargets) -> Self {
        NeuralAgent {
            network,
            rng,
            targets,
            history: Vec::new(),
            learning: true,
            last_source: None,
        }
    }

    /// Build a fresh network from `config`. With a seed, weights and fallback
    /// choices are reproducible.
    pub fn from_config(config: &NetworkConfig, targets: RewardTargets, device: &B::Device) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let network = config.init(&mut rng, device);
        Self::new(network, rng, targets)
    }

    pub fn network(&self) -> &PolicyNetwork<B> {
        &self.network
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// Disabling learning also drops any moves recorded for the current game.
    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
        if !learning {
            self.history.clear();
        }
    }

    /// How the most recent move was chosen.
    pub fn last_move_source(&self) -> Option<MoveSource> {
        self.last_source
    }

    /// Moves recorded for the game in progress.
    pub fn pending_moves(&self) -> usize {
        self.history.len()
    }

    /// Drop the moves of an abandoned game without learning from them.
    pub fn forget_game(&mut self) {
        self.history.clear();
    }

    /// Train on the recorded moves for a finished game. Returns the mean
    /// pre-update loss, or `None` when there was nothing to learn.
    pub fn learn_from_outcome(&mut self, outcome: GameOutcome) -> Result<Option<f64>, NetworkError> {
        let history = std::mem::take(&mut self.history);
        let Some(chosen) = chosen_cell_target(outcome, self.targets) else {
            return Ok(None);
        };
        if history.is_empty() {
            return Ok(None);
        }

        let mut total = 0.0;
        for record in &history {
            let target = target_for(record, chosen, &self.network);
            total += self.network.train(&record.input, &target)?;
        }
        let mean = total / history.len() as f64;
        log::debug!(
            "trained on {} moves after {:?}, mean loss {:.5}",
            history.len(),
            outcome,
            mean
        );
        Ok(Some(mean))
    }
}

impl<B: Backend> Agent for NeuralAgent<B> {
    fn select_action(&mut self, board: &Board) -> Result<usize, SelectionError> {
        let selected = select_move(board, &self.network, &mut self.rng)?;
        match selected.source {
            MoveSource::Network => log::debug!("agent played {} based on scores", selected.cell),
            MoveSource::RandomFallback => log::debug!("agent played {} randomly", selected.cell),
        }
        self.last_source = Some(selected.source);

        if self.learning {
            self.history.push(MoveRecord {
                input: encode_board(board),
                cell: selected.cell,
            });
        }
        Ok(selected.cell)
    }

    fn name(&self) -> &str {
        "Neural"
    }

    fn observe_outcome(&mut self, outcome: GameOutcome) -> Result<Option<f64>, NetworkError> {
        if !self.learning {
            return Ok(None);
        }
        self.learn_from_outcome(outcome)
    }
}
