//! Turning a finished game into training targets for the policy network.
//!
//! The network never decides what it should have scored; this module does.
//! For each move the agent made, the target is the network's own current
//! output for that position with the chosen cell overwritten:
//!
//! - agent won:  `target[cell] = win_target` (reinforce the move)
//! - agent lost: `target[cell] = loss_target` (discourage the move)
//! - draw:       no training at all
//!
//! Every other cell keeps its current score, so its error is zero and the
//! gradient flows only through the chosen cell.

use burn::prelude::*;

use crate::ai::PolicyNetwork;
use crate::game::{GameOutcome, Player, CELLS};

/// Score targets written into the chosen cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardTargets {
    pub win: f64,
    pub loss: f64,
}

impl Default for RewardTargets {
    fn default() -> Self {
        RewardTargets {
            win: 1.0,
            loss: 0.0,
        }
    }
}

/// A move the agent made: the encoded position it saw and the cell it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRecord {
    pub input: [f64; CELLS],
    pub cell: usize,
}

/// Desired score for the agent's chosen cells given how the game ended,
/// `None` when the outcome carries no signal.
pub fn chosen_cell_target(outcome: GameOutcome, targets: RewardTargets) -> Option<f64> {
    match outcome {
        GameOutcome::Winner(Player::Agent) => Some(targets.win),
        GameOutcome::Winner(Player::Human) => Some(targets.loss),
        GameOutcome::Draw => None,
    }
}

/// Target for one recorded move: the network's current output for the
/// position with the chosen cell set to `chosen`. Build it right before the
/// gradient step it feeds, so only the chosen cell carries error.
pub fn target_for<B: Backend>(
    record: &MoveRecord,
    chosen: f64,
    network: &PolicyNetwork<B>,
) -> Vec<f64> {
    let mut target = network.forward(&record.input);
    target[record.cell] = chosen;
    target
}
