mod agent;
pub mod move_selector;
pub mod network;
mod neural;
mod random;
pub mod state_encoding;

pub use agent::Agent;
pub use move_selector::{select_move, MoveSource, SelectedMove};
pub use network::{mean_squared_error, NetworkConfig, PolicyNetwork, INPUT_SIZE, OUTPUT_SIZE};
pub use neural::{InferBackend, NeuralAgent};
pub use random::RandomAgent;
