//! Read-only move advisor for interactive play.

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::Result,
    q_learning::{policy, q_table::QTable},
    tictactoe::BoardState,
};

/// Stateless query surface over a trained Q-table.
///
/// This is the only entry point a presentation layer needs: load once,
/// then ask for the best action for any live board. The advisor never
/// mutates its table. When the table has no signal for a state (all legal
/// actions at 0.0) the pick is uniform random, so an untrained or
/// partially-trained AI plays unpredictably rather than always taking the
/// lowest empty cell.
#[derive(Debug)]
pub struct MoveAdvisor {
    table: QTable,
    rng: StdRng,
}

impl MoveAdvisor {
    /// Create an advisor over a table already in memory
    pub fn new(table: QTable) -> Self {
        Self {
            table,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Load the table from a save file.
    ///
    /// A missing file yields an advisor over an empty table (random play).
    ///
    /// # Errors
    ///
    /// Returns `Error::CorruptTable` for a malformed file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(QTable::load_from_file(path)?))
    }

    /// Fix the RNG seed for reproducible tie handling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pick the best known action for a state, or `None` on a full board
    pub fn choose_best_action(&mut self, state: &BoardState) -> Option<usize> {
        policy::greedy_action(&self.table, state, &mut self.rng)
    }

    /// Access the underlying table
    pub fn table(&self) -> &QTable {
        &self.table
    }
}
