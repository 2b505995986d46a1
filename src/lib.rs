//! # ML Tic-Tac-Toe
//!
//! Tic-tac-toe against an agent that picks moves with a small feed-forward
//! network (9 -> hidden -> 9, sigmoid activations) built on the Burn tensor
//! library, and learns from the outcome of each game by gradient descent.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, win/draw detection and turn order
//! - [`ai`]: Policy network, board encoding, move selection, agents
//! - [`training`]: Outcome-based targets, episodes, metrics, trainer
//! - [`cli`]: Text rendering, move prompt and the interactive game loop
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`logging`]: Logger initialisation

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod training;
