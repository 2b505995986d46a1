use std::io::{BufRead, Write};

use burn::prelude::*;

use crate::ai::{Agent, MoveSource, NeuralAgent};
use crate::cli::prompt::{ask_play_again, read_human_move};
use crate::cli::render::{announcement, render_board};
use crate::error::GameError;
use crate::game::{GameOutcome, GameState, Player};

/// Interactive play options.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// The human moves first when true.
    pub human_first: bool,
    /// Train the agent on each finished game.
    pub learn_from_games: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            human_first: true,
            learn_from_games: true,
        }
    }
}

/// How a single interactive game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(GameOutcome),
    /// The human's input ended mid-game.
    InputClosed,
}

/// Running score across the games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub human_wins: usize,
    pub agent_wins: usize,
    pub draws: usize,
}

impl SessionStats {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Human) => self.human_wins += 1,
            GameOutcome::Winner(Player::Agent) => self.agent_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.human_wins + self.agent_wins + self.draws
    }
}

/// Play one human-vs-agent game over text I/O, then let the agent learn
/// from the result.
pub fn play_game<B: Backend, R: BufRead, W: Write>(
    agent: &mut NeuralAgent<B>,
    input: &mut R,
    output: &mut W,
    first: Player,
) -> Result<GameEnd, GameError> {
    writeln!(output, "Game Starting...")?;
    let mut state = GameState::initial(first);
    if first == Player::Human {
        write!(output, "{}", render_board(state.board()))?;
    }

    while !state.is_terminal() {
        let cell = match state.current_player() {
            Player::Human => match read_human_move(input, output, state.board())? {
                Some(cell) => cell,
                None => {
                    agent.forget_game();
                    return Ok(GameEnd::InputClosed);
                }
            },
            Player::Agent => {
                let cell = agent.select_action(state.board())?;
                match agent.last_move_source() {
                    Some(MoveSource::RandomFallback) => {
                        writeln!(output, "---- AI has played {cell} randomly ----")?
                    }
                    _ => writeln!(output, "---- AI has played {cell} based on probabilities ----")?,
                }
                cell
            }
        };
        state
            .apply_move(cell)
            .map_err(|source| GameError::IllegalMove { cell, source })?;
        write!(output, "{}", render_board(state.board()))?;
    }

    let outcome = state.outcome().ok_or(GameError::MissingOutcome)?;
    writeln!(output, "{}", announcement(outcome))?;

    if let Some(loss) = agent.observe_outcome(outcome)? {
        log::info!("agent learned from {:?}, mean loss {:.5}", outcome, loss);
    }
    Ok(GameEnd::Finished(outcome))
}

/// Play games until the user declines another or input ends. The same
/// network carries over from game to game.
pub fn run_session<B: Backend, R: BufRead, W: Write>(
    agent: &mut NeuralAgent<B>,
    input: &mut R,
    output: &mut W,
    config: &PlayConfig,
) -> Result<SessionStats, GameError> {
    agent.set_learning(config.learn_from_games);
    let first = if config.human_first {
        Player::Human
    } else {
        Player::Agent
    };

    let mut stats = SessionStats::default();
    loop {
        match play_game(agent, input, output, first)? {
            GameEnd::InputClosed => break,
            GameEnd::Finished(outcome) => stats.record(outcome),
        }
        if !ask_play_again(input, output)? {
            break;
        }
    }

    writeln!(
        output,
        "Human {} - AI {} - Draws {}",
        stats.human_wins, stats.agent_wins, stats.draws
    )?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{InferBackend, NetworkConfig, PolicyNetwork};
    use crate::training::reward::RewardTargets;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn seeded_agent(seed: u64) -> NeuralAgent {
        let config = NetworkConfig {
            seed: Some(seed),
            ..Default::default()
        };
        NeuralAgent::from_config(&config, RewardTargets::default(), &Default::default())
    }

    /// Every cell in order: the human always finds the lowest free cell.
    fn all_cells() -> String {
        (0..9).map(|c| format!("{c}\n")).collect()
    }

    #[test]
    fn test_game_plays_to_an_announcement() {
        let mut agent = seeded_agent(1);
        let input_text = all_cells().repeat(5);
        let mut input = Cursor::new(input_text);
        let mut output: Vec<u8> = Vec::new();

        let end = play_game(&mut agent, &mut input, &mut output, Player::Human).unwrap();
        let GameEnd::Finished(outcome) = end else {
            panic!("game did not finish: {end:?}");
        };

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Game Starting..."));
        assert_eq!(text.matches(announcement(outcome)).count(), 1);
        assert_eq!(agent.pending_moves(), 0);
    }

    #[test]
    fn test_end_of_input_abandons_game() {
        let mut agent = seeded_agent(2);
        let mut input = Cursor::new("");
        let mut output: Vec<u8> = Vec::new();
        let before = agent.network().weights();

        let end = play_game(&mut agent, &mut input, &mut output, Player::Agent).unwrap();
        assert_eq!(end, GameEnd::InputClosed);
        assert_eq!(agent.pending_moves(), 0);
        assert_eq!(agent.network().weights(), before);
    }

    #[test]
    fn test_fallback_move_is_reported() {
        let network = PolicyNetwork::<InferBackend>::zeroed(10, 0.1, &Default::default());
        let mut agent: NeuralAgent =
            NeuralAgent::new(network, StdRng::seed_from_u64(3), RewardTargets::default());
        let mut input = Cursor::new("");
        let mut output: Vec<u8> = Vec::new();

        play_game(&mut agent, &mut input, &mut output, Player::Agent).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("randomly"));
    }

    #[test]
    fn test_session_plays_until_declined() {
        let mut agent = seeded_agent(4);
        // Game one, "y", game two, "n"; stray cell numbers are re-prompted
        let game = all_cells().repeat(2);
        let input_text = format!("{game}y\n{game}n\n");
        let mut input = Cursor::new(input_text);
        let mut output: Vec<u8> = Vec::new();

        let stats = run_session(&mut agent, &mut input, &mut output, &PlayConfig::default()).unwrap();
        assert_eq!(stats.games(), 2);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Game Starting...").count(), 2);
    }

    #[test]
    fn test_session_without_learning_keeps_weights() {
        let mut agent = seeded_agent(5);
        let before = agent.network().weights();
        let config = PlayConfig {
            learn_from_games: false,
            ..Default::default()
        };
        let mut input = Cursor::new(format!("{}n\n", all_cells().repeat(2)));
        let mut output: Vec<u8> = Vec::new();

        run_session(&mut agent, &mut input, &mut output, &config).unwrap();
        assert_eq!(agent.network().weights(), before);
    }

    #[test]
    fn test_session_stats() {
        let mut stats = SessionStats::default();
        stats.record(GameOutcome::Winner(Player::Human));
        stats.record(GameOutcome::Draw);
        stats.record(GameOutcome::Draw);
        assert_eq!(stats.games(), 3);
        assert_eq!(stats.draws, 2);
    }
}
