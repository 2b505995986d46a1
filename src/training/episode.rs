use burn::prelude::*;

use crate::ai::{Agent, NeuralAgent};
use crate::error::GameError;
use crate::game::{GameOutcome, GameState, Player};
use crate::training::metrics::EpisodeResult;

/// Result of playing a single episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeTrace {
    pub result: EpisodeResult,
    pub outcome: GameOutcome,
    /// Mean loss of the update the agent made afterwards, if it learned.
    pub loss: Option<f64>,
}

/// Win/draw/loss fractions from the agent's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalSummary {
    pub games: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

/// Play one game to the end. `agent` takes the `Agent` side, `opponent`
/// the `Human` side. The agent is told the outcome afterwards.
pub fn play_episode(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    first: Player,
) -> Result<EpisodeTrace, GameError> {
    let mut state = GameState::initial(first);

    while !state.is_terminal() {
        let action = match state.current_player() {
            Player::Agent => agent.select_action(state.board())?,
            Player::Human => opponent.select_action(state.board())?,
        };
        state
            .apply_move(action)
            .map_err(|source| GameError::IllegalMove {
                cell: action,
                source,
            })?;
    }

    let outcome = state.outcome().ok_or(GameError::MissingOutcome)?;
    let loss = agent.observe_outcome(outcome)?;

    let winner = match outcome {
        GameOutcome::Winner(p) => Some(p),
        GameOutcome::Draw => None,
    };

    Ok(EpisodeTrace {
        result: EpisodeResult {
            winner,
            game_length: state.move_count(),
        },
        outcome,
        loss,
    })
}

/// Evaluate the agent against `opponent` over `games`, alternating the first
/// player. Learning is switched off for the duration and restored after.
pub fn evaluate<B: Backend>(
    agent: &mut NeuralAgent<B>,
    opponent: &mut dyn Agent,
    games: usize,
) -> Result<EvalSummary, GameError> {
    let was_learning = agent.is_learning();
    agent.set_learning(false);

    let mut summary = EvalSummary {
        games,
        ..Default::default()
    };
    let mut tally = (0usize, 0usize, 0usize);
    let mut result = Ok(());

    for game_idx in 0..games {
        let first = if game_idx % 2 == 0 {
            Player::Agent
        } else {
            Player::Human
        };
        match play_episode(agent, opponent, first) {
            Ok(trace) => match trace.result.winner {
                Some(Player::Agent) => tally.0 += 1,
                None => tally.1 += 1,
                Some(Player::Human) => tally.2 += 1,
            },
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    agent.set_learning(was_learning);
    result?;

    if games > 0 {
        let n = games as f64;
        summary.win_rate = tally.0 as f64 / n;
        summary.draw_rate = tally.1 as f64 / n;
        summary.loss_rate = tally.2 as f64 / n;
    }
    Ok(summary)
}
