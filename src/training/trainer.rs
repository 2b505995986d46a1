use burn::prelude::*;

use crate::ai::{Agent, NeuralAgent, RandomAgent};
use crate::error::GameError;
use crate::game::Player;
use crate::training::episode::{evaluate, play_episode, EvalSummary};
use crate::training::metrics::TrainingMetrics;
use crate::training::reward::RewardTargets;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub log_interval: usize,
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Score written into the chosen cell after an agent win.
    pub win_target: f64,
    /// Score written into the chosen cell after an agent loss.
    pub loss_target: f64,
    /// Seed for the random opponent. `None` seeds from the OS.
    pub opponent_seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 5_000,
            log_interval: 500,
            eval_interval: 1_000,
            eval_games: 200,
            win_target: 1.0,
            loss_target: 0.0,
            opponent_seed: None,
        }
    }
}

impl TrainerConfig {
    pub fn reward_targets(&self) -> RewardTargets {
        RewardTargets {
            win: self.win_target,
            loss: self.loss_target,
        }
    }
}

/// What a training run ended with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub average_loss: f64,
    pub final_eval: EvalSummary,
}

/// Trains a neural agent by playing it against a random opponent.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    fn opponent(&self) -> RandomAgent {
        match self.config.opponent_seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        }
    }

    /// Run the full training loop against a random opponent. The agent
    /// alternates between moving first and second and learns from every game.
    pub fn train<B: Backend>(
        &self,
        agent: &mut NeuralAgent<B>,
    ) -> Result<TrainingSummary, GameError> {
        let mut opponent = self.opponent();
        self.train_against(agent, &mut opponent)
    }

    /// Same loop as [`Trainer::train`] with a caller-supplied opponent. The
    /// agent's learning flag is restored afterwards, also when a game fails.
    pub fn train_against<B: Backend>(
        &self,
        agent: &mut NeuralAgent<B>,
        opponent: &mut dyn Agent,
    ) -> Result<TrainingSummary, GameError> {
        let was_learning = agent.is_learning();
        agent.set_learning(true);
        let result = self.run(agent, opponent);
        agent.set_learning(was_learning);
        result
    }

    fn run<B: Backend>(
        &self,
        agent: &mut NeuralAgent<B>,
        opponent: &mut dyn Agent,
    ) -> Result<TrainingSummary, GameError> {
        let mut metrics = TrainingMetrics::with_capacity(self.config.log_interval.max(1));

        log::info!(
            "starting training for {} episodes (hidden {}, lr {})",
            self.config.num_episodes,
            agent.network().hidden_size(),
            agent.network().learning_rate()
        );

        for episode in 1..=self.config.num_episodes {
            let first = if episode % 2 == 0 {
                Player::Agent
            } else {
                Player::Human
            };
            let trace = play_episode(agent, opponent, first)?;
            if let Some(loss) = trace.loss {
                metrics.record_update(loss);
            }
            metrics.record_episode(trace.result);

            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                log::info!(
                    "episode {}/{} | loss: {:.4} | win: {:.1}% | draw: {:.1}% | lose: {:.1}% | avg_len: {:.1}",
                    episode,
                    self.config.num_episodes,
                    metrics.average_loss(window),
                    metrics.win_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }

            if self.config.eval_interval > 0 && episode % self.config.eval_interval == 0 {
                let eval = evaluate(agent, opponent, self.config.eval_games)?;
                log::info!(
                    "eval vs random ({} games): win {:.1}% | draw {:.1}% | lose {:.1}%",
                    eval.games,
                    eval.win_rate * 100.0,
                    eval.draw_rate * 100.0,
                    eval.loss_rate * 100.0
                );
            }
        }

        let final_eval = evaluate(agent, opponent, self.config.eval_games)?;

        log::info!(
            "training complete after {} episodes, final win rate vs random {:.1}%",
            metrics.total_episodes(),
            final_eval.win_rate * 100.0
        );

        Ok(TrainingSummary {
            episodes: metrics.total_episodes(),
            average_loss: metrics.average_loss(self.config.log_interval),
            final_eval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::NetworkConfig;
    use crate::error::SelectionError;
    use crate::game::Board;

    fn small_config() -> TrainerConfig {
        TrainerConfig {
            num_episodes: 40,
            log_interval: 10,
            eval_interval: 20,
            eval_games: 10,
            opponent_seed: Some(1),
            ..Default::default()
        }
    }

    fn seeded_agent(seed: u64) -> NeuralAgent {
        let config = NetworkConfig {
            seed: Some(seed),
            ..Default::default()
        };
        NeuralAgent::from_config(&config, RewardTargets::default(), &Default::default())
    }

    #[test]
    fn test_train_runs_all_episodes() {
        let mut agent = seeded_agent(2);
        let before = agent.network().weights();

        let summary = Trainer::new(small_config()).train(&mut agent).unwrap();
        assert_eq!(summary.episodes, 40);
        assert_eq!(summary.final_eval.games, 10);
        assert_ne!(agent.network().weights(), before);
    }

    #[test]
    fn test_train_restores_learning_flag() {
        let mut agent = seeded_agent(3);
        agent.set_learning(false);
        Trainer::new(small_config()).train(&mut agent).unwrap();
        assert!(!agent.is_learning());
    }

    /// Always claims cell 0, so its second move is illegal.
    struct StubbornAgent;

    impl Agent for StubbornAgent {
        fn select_action(&mut self, _board: &Board) -> Result<usize, SelectionError> {
            Ok(0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    #[test]
    fn test_failed_game_restores_learning_flag() {
        let mut agent = seeded_agent(6);
        agent.set_learning(false);

        let result = Trainer::new(small_config()).train_against(&mut agent, &mut StubbornAgent);
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
        assert!(!agent.is_learning());
        assert_eq!(agent.pending_moves(), 0);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let mut a = seeded_agent(4);
        let mut b = seeded_agent(4);
        let sa = Trainer::new(small_config()).train(&mut a).unwrap();
        let sb = Trainer::new(small_config()).train(&mut b).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(a.network().weights(), b.network().weights());
    }

    #[test]
    fn test_reward_targets_from_config() {
        let config = TrainerConfig {
            win_target: 0.9,
            loss_target: 0.1,
            ..Default::default()
        };
        assert_eq!(config.reward_targets(), RewardTargets { win: 0.9, loss: 0.1 });
    }
}
