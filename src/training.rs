//! Self-play training loop for the tabular Q-learning policy.
//!
//! Both sides of every episode are the same evolving policy: they share
//! one Q-table and one global exploration rate. Updates are applied after
//! every half-move. A player's non-final moves are credited with reward
//! 0.0 once the opponent has replied (the deferred update), the winning
//! move is credited +1.0, the loser's last move −1.0, and the final move
//! of a drawn game 0.0.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    q_learning::{QTable, policy},
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Reward for winning the episode
pub const REWARD_WIN: f64 = 1.0;
/// Reward applied to the loser's last move
pub const REWARD_LOSE: f64 = -1.0;
/// Reward for a drawn episode (and for non-final moves)
pub const REWARD_DRAW: f64 = 0.0;

/// Hyperparameters for a self-play training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α
    pub learning_rate: f64,

    /// Discount factor γ
    pub discount_factor: f64,

    /// Initial exploration rate
    pub epsilon_start: f64,

    /// Exploration rate floor
    pub epsilon_end: f64,

    /// Number of self-play episodes
    pub episodes: usize,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.9,
            epsilon_start: 1.0,
            epsilon_end: 0.01,
            episodes: 20_000,
            seed: None,
        }
    }
}

impl Hyperparameters {
    /// Per-episode multiplicative epsilon decay.
    ///
    /// Chosen so that `epsilon_start * decay^episodes == epsilon_end`.
    pub fn epsilon_decay(&self) -> f64 {
        if self.epsilon_start > 0.0 && self.episodes > 0 {
            (self.epsilon_end / self.epsilon_start).powf(1.0 / self.episodes as f64)
        } else {
            1.0
        }
    }
}

/// Aggregate result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Episodes played
    pub episodes: usize,

    /// Episodes won by X
    pub x_wins: usize,

    /// Episodes won by O
    pub o_wins: usize,

    /// Drawn episodes
    pub draws: usize,

    /// Exploration rate after the final episode
    pub final_epsilon: f64,

    /// Number of (state, action) entries in the table afterwards
    pub table_size: usize,
}

/// Per-player memory of the last move made, kept only within one episode.
///
/// The update for a move is deferred until the same player's next turn,
/// when the board the opponent produced is known.
#[derive(Debug, Default)]
struct EpisodeTrace {
    x: Option<(BoardState, usize)>,
    o: Option<(BoardState, usize)>,
}

impl EpisodeTrace {
    fn slot_mut(&mut self, player: Player) -> &mut Option<(BoardState, usize)> {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

/// Drives self-play episodes and applies TD updates to a shared Q-table
#[derive(Debug)]
pub struct SelfPlayTrainer {
    config: Hyperparameters,
    table: QTable,
    epsilon: f64,
    rng: StdRng,
}

impl SelfPlayTrainer {
    /// Create a trainer over an existing table (possibly freshly loaded)
    pub fn new(config: Hyperparameters, table: QTable) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let epsilon = config.epsilon_start;
        Self {
            config,
            table,
            epsilon,
            rng,
        }
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The table being trained
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Consume the trainer, yielding the trained table
    pub fn into_table(self) -> QTable {
        self.table
    }

    fn update(&mut self, state: &BoardState, action: usize, reward: f64, next: &BoardState) {
        self.table.q_learning_update(
            state,
            action,
            reward,
            next,
            self.config.learning_rate,
            self.config.discount_factor,
        );
    }

    /// Play one self-play episode at the current exploration rate.
    ///
    /// Epsilon is not decayed here; [`run_with`] decays it between
    /// episodes.
    ///
    /// # Errors
    ///
    /// Propagates `Error::InvalidMove` if a selected action were illegal,
    /// which cannot happen for actions drawn from `legal_actions`.
    pub fn play_episode(&mut self) -> Result<GameOutcome> {
        let mut state = BoardState::new();
        let mut trace = EpisodeTrace::default();

        loop {
            let current = state.to_move;
            let action =
                match policy::epsilon_greedy_action(&self.table, &state, self.epsilon, &mut self.rng)
                {
                    Some(action) => action,
                    // Only reachable if the loop were entered on a full
                    // board; treated as a draw, never as a failure.
                    None => return Ok(GameOutcome::Draw),
                };

            let prev_state = state;
            state = prev_state.make_move(action)?;

            // Deferred update for this player's previous move, now that the
            // board it led to (after the opponent's reply) is known.
            if let Some((last_state, last_action)) = trace.slot_mut(current).take() {
                self.update(&last_state, last_action, REWARD_DRAW, &prev_state);
            }

            if state.has_won(current) {
                self.update(&prev_state, action, REWARD_WIN, &state);
                if let Some((opp_state, opp_action)) = trace.slot_mut(current.opponent()).take() {
                    self.update(&opp_state, opp_action, REWARD_LOSE, &prev_state);
                }
                return Ok(GameOutcome::Win(current));
            }

            if state.is_draw() {
                self.update(&prev_state, action, REWARD_DRAW, &state);
                return Ok(GameOutcome::Draw);
            }

            *trace.slot_mut(current) = Some((prev_state, action));
        }
    }

    /// Run the configured number of episodes.
    pub fn run(&mut self) -> Result<TrainingReport> {
        self.run_with(|_, _| {})
    }

    /// Run the configured number of episodes, invoking `on_episode` with
    /// the episode index and outcome after each game (progress reporting).
    pub fn run_with<F>(&mut self, mut on_episode: F) -> Result<TrainingReport>
    where
        F: FnMut(usize, GameOutcome),
    {
        let decay = self.config.epsilon_decay();
        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;

        for episode in 0..self.config.episodes {
            let outcome = self.play_episode()?;
            match outcome {
                GameOutcome::Win(Player::X) => x_wins += 1,
                GameOutcome::Win(Player::O) => o_wins += 1,
                GameOutcome::Draw => draws += 1,
            }

            self.epsilon = (self.epsilon * decay).max(self.config.epsilon_end);
            on_episode(episode, outcome);
        }

        Ok(TrainingReport {
            episodes: self.config.episodes,
            x_wins,
            o_wins,
            draws,
            final_epsilon: self.epsilon,
            table_size: self.table.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_decay_reaches_floor() {
        let config = Hyperparameters {
            episodes: 100,
            ..Default::default()
        };
        let decay = config.epsilon_decay();
        assert!(decay < 1.0);

        let mut epsilon = config.epsilon_start;
        for _ in 0..config.episodes {
            epsilon = (epsilon * decay).max(config.epsilon_end);
        }
        assert!((epsilon - config.epsilon_end).abs() < 1e-6);
    }

    #[test]
    fn test_zero_episodes_keeps_epsilon() {
        let config = Hyperparameters {
            episodes: 0,
            ..Default::default()
        };
        assert_eq!(config.epsilon_decay(), 1.0);
    }

    #[test]
    fn test_single_random_episode_populates_table() {
        let config = Hyperparameters {
            episodes: 1,
            seed: Some(3),
            ..Default::default()
        };
        let mut trainer = SelfPlayTrainer::new(config, QTable::new());
        let outcome = trainer.play_episode().unwrap();

        // The terminal move always receives an update, so an entry exists.
        assert!(!trainer.table().is_empty());
        // A decisive game stores ±α on the terminal transitions.
        if let GameOutcome::Win(_) = outcome {
            assert!(trainer.table().iter().any(|(_, &v)| v != 0.0));
        }
    }

    #[test]
    fn test_report_counts_sum_to_episodes() {
        let config = Hyperparameters {
            episodes: 50,
            seed: Some(11),
            ..Default::default()
        };
        let mut trainer = SelfPlayTrainer::new(config, QTable::new());
        let report = trainer.run().unwrap();

        assert_eq!(report.episodes, 50);
        assert_eq!(report.x_wins + report.o_wins + report.draws, 50);
        assert_eq!(report.table_size, trainer.table().len());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |seed| {
            let config = Hyperparameters {
                episodes: 30,
                seed: Some(seed),
                ..Default::default()
            };
            SelfPlayTrainer::new(config, QTable::new()).run().unwrap()
        };

        let a = run(5);
        let b = run(5);
        assert_eq!(a.x_wins, b.x_wins);
        assert_eq!(a.o_wins, b.o_wins);
        assert_eq!(a.draws, b.draws);
        assert_eq!(a.table_size, b.table_size);
    }

    #[test]
    fn test_callback_sees_every_episode() {
        let config = Hyperparameters {
            episodes: 12,
            seed: Some(2),
            ..Default::default()
        };
        let mut trainer = SelfPlayTrainer::new(config, QTable::new());

        let mut seen = Vec::new();
        trainer.run_with(|episode, _| seen.push(episode)).unwrap();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
    }
}
