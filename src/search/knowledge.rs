// Offline-trained value table.
//
// The knowledge base maps encoded positions to per-hole value estimates,
// fitted once from archived games before any search runs. Training is a
// plain damped update toward a one-step reward: archived data carries no
// successor states, so there is nothing to bootstrap from and the discount
// factor never contributes. That is the intended procedure, not an
// approximation of something deeper.
//
// During play the table is read-only and may be shared freely across
// searches.

use crate::board::{Board, Side, HOLES_PER_SIDE};
use crate::data::Observation;
use crate::search::encoding::encode;
use std::collections::HashMap;

/// Training schedule and reward shape.
#[derive(Debug, Clone)]
pub struct TrainingParams {
    /// Full passes over the observation set.
    pub epochs: u32,
    /// Learning rate at the first epoch.
    pub initial_rate: f64,
    /// Multiplicative rate decay applied after each epoch.
    pub rate_decay: f64,
    /// Discount factor. Carried for completeness; archived observations have
    /// no recorded successor, so the discounted term is always zero.
    pub discount: f64,
    /// Reward for a move taken in a game the acting player won.
    pub win_reward: f64,
    /// Reward for a move taken in a game the acting player lost.
    pub lose_reward: f64,
    /// Extra reward per seed the move captures when replayed.
    pub capture_reward_factor: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 200,
            initial_rate: 0.1,
            rate_decay: 0.995,
            discount: 0.9,
            win_reward: 1.0,
            lose_reward: -1.0,
            capture_reward_factor: 0.2,
        }
    }
}

/// Encoded position -> per-hole value estimates.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    table: HashMap<u64, [f64; HOLES_PER_SIDE]>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the table from archived observations. Deterministic: observations
    /// are swept in order, every epoch, with no sampling. Reconstruction
    /// failures cost only the capture term of the affected observation.
    pub fn train(&mut self, observations: &[Observation], params: &TrainingParams) {
        let mut rate = params.initial_rate;
        for _ in 0..params.epochs {
            for obs in observations {
                let key = encode(&obs.player_holes, &obs.opponent_holes);
                let action = obs.move_index();

                let outcome = if obs.won {
                    params.win_reward
                } else {
                    params.lose_reward
                };
                let reward =
                    outcome + params.capture_reward_factor * replayed_capture_yield(obs);

                let values = self.table.entry(key).or_insert([0.0; HOLES_PER_SIDE]);
                let old = values[action];
                values[action] = old + rate * (reward - old);
            }
            rate *= params.rate_decay;
        }
        log::info!(
            "trained value table: {} states from {} observations over {} epochs",
            self.table.len(),
            observations.len(),
            params.epochs
        );
    }

    /// Best stored estimate for a position, clamped to zero: a position with
    /// only negative signal is treated like an unknown one. Unseen keys
    /// score zero.
    pub fn best_value(&self, key: u64) -> f64 {
        match self.table.get(&key) {
            Some(values) => values.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(0.0),
            None => 0.0,
        }
    }

    /// Raw per-hole estimates for a position, if the position was seen.
    pub fn values(&self, key: u64) -> Option<&[f64; HOLES_PER_SIDE]> {
        self.table.get(&key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

/// Replay an observation's move against a reconstructed board and report how
/// many seeds it captures. Observations that cannot be reconstructed or
/// replayed contribute nothing.
fn replayed_capture_yield(obs: &Observation) -> f64 {
    let board = match Board::from_holes(obs.player_holes, obs.opponent_holes, Side::First) {
        Ok(board) => board,
        Err(_) => return 0.0,
    };
    match board.play(Side::First, obs.move_index()) {
        Ok((gain, _)) => gain as f64,
        Err(_) => 0.0,
    }
}
