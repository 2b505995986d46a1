use std::collections::VecDeque;

use crate::game::Player;

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeResult {
    pub winner: Option<Player>,
    pub game_length: usize,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    update_losses: VecDeque<f64>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            update_losses: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    pub fn record_update(&mut self, loss: f64) {
        self.update_losses.push_back(loss);
        if self.update_losses.len() > self.capacity {
            self.update_losses.pop_front();
        }
    }

    /// Fraction of the last N episodes whose result satisfies `pred`.
    fn rate(&self, last_n: usize, pred: impl Fn(&EpisodeResult) -> bool) -> f64 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| pred(r))
            .count();
        hits as f64 / n as f64
    }

    /// Agent win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f64 {
        self.rate(last_n, |r| r.winner == Some(Player::Agent))
    }

    /// Agent loss rate in the last N episodes.
    pub fn loss_rate(&self, last_n: usize) -> f64 {
        self.rate(last_n, |r| r.winner == Some(Player::Human))
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f64 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average loss over the last N updates.
    pub fn average_loss(&self, last_n: usize) -> f64 {
        let n = self.update_losses.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self.update_losses.iter().rev().take(n).sum();
        sum / n as f64
    }

    /// Average game length over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f64 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f64 / n as f64
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<Player>, game_length: usize) -> EpisodeResult {
        EpisodeResult {
            winner,
            game_length,
        }
    }

    #[test]
    fn test_empty_metrics_are_zero() {
        let metrics = TrainingMetrics::new();
        assert_eq!(metrics.win_rate(10), 0.0);
        assert_eq!(metrics.average_loss(10), 0.0);
        assert_eq!(metrics.average_game_length(10), 0.0);
        assert_eq!(metrics.total_episodes(), 0);
    }

    #[test]
    fn test_rates() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_episode(result(Some(Player::Agent), 5));
        metrics.record_episode(result(Some(Player::Human), 6));
        metrics.record_episode(result(None, 9));
        metrics.record_episode(result(Some(Player::Agent), 7));

        assert!((metrics.win_rate(4) - 0.5).abs() < 1e-6);
        assert!((metrics.loss_rate(4) - 0.25).abs() < 1e-6);
        assert!((metrics.draw_rate(4) - 0.25).abs() < 1e-6);
        assert!((metrics.average_game_length(4) - 6.75).abs() < 1e-6);
        // Window of the last two only
        assert!((metrics.win_rate(2) - 0.5).abs() < 1e-6);
        assert!((metrics.draw_rate(2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_caps_window_but_not_total() {
        let mut metrics = TrainingMetrics::with_capacity(3);
        for _ in 0..5 {
            metrics.record_episode(result(Some(Player::Human), 5));
        }
        metrics.record_episode(result(Some(Player::Agent), 5));
        assert_eq!(metrics.total_episodes(), 6);
        assert!((metrics.win_rate(100) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_loss_window() {
        let mut metrics = TrainingMetrics::new();
        for loss in [0.4, 0.2, 0.1] {
            metrics.record_update(loss);
        }
        assert!((metrics.average_loss(2) - 0.15).abs() < 1e-6);
    }
}
