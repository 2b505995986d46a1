//! Training infrastructure: outcome-based target construction, episodes
//! against an opponent, rolling metrics, and the headless trainer.

pub mod episode;
pub mod metrics;
pub mod reward;
pub mod trainer;
