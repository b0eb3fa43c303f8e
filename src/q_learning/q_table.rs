//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::tictactoe::BoardState;

/// Q-table mapping (state, action) pairs to Q-values
///
/// Keys are 9-character board encodings and move positions. Unseen pairs
/// implicitly hold 0.0; that default is a genuine zero-initialization
/// policy, not a "not found" condition. Persistence lives in
/// [`crate::q_learning::serialization`], which flattens the compound key
/// into the nested JSON shape.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    /// Q-values: (board_encoding, action_position) -> Q-value
    q_values: HashMap<(String, usize), f64>,
}

impl QTable {
    /// Create a new empty Q-table
    pub fn new() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }

    /// Get Q-value for a state-action pair (0.0 when unseen)
    pub fn get(&self, state: &BoardState, action: usize) -> f64 {
        *self
            .q_values
            .get(&(state.encode(), action))
            .unwrap_or(&0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &BoardState, action: usize, value: f64) {
        self.q_values.insert((state.encode(), action), value);
    }

    /// Get maximum Q-value over the legal actions in a state
    ///
    /// Returns 0.0 when no legal actions exist (full board). A negative
    /// maximum is possible when every legal action holds a stored loss.
    pub fn max_q(&self, state: &BoardState, legal_actions: &[usize]) -> f64 {
        if legal_actions.is_empty() {
            return 0.0;
        }
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update: off-policy one-step TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: &BoardState,
        action: usize,
        reward: f64,
        next_state: &BoardState,
        learning_rate: f64,
        discount_factor: f64,
    ) {
        let current_q = self.get(state, action);
        let max_next_q = self.max_q(next_state, &next_state.legal_actions());
        let td_target = reward + discount_factor * max_next_q;
        let new_q = current_q + learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    /// Check whether the table holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Iterate over all stored entries
    pub fn iter(&self) -> impl Iterator<Item = (&(String, usize), &f64)> {
        self.q_values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_default_is_zero() {
        let qtable = QTable::new();
        let state = BoardState::new();
        assert_eq!(qtable.get(&state, 0), 0.0);
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = BoardState::new();
        qtable.set(&state, 4, 1.5);
        assert_eq!(qtable.get(&state, 4), 1.5);
        assert_eq!(qtable.len(), 1);

        // Last write wins
        qtable.set(&state, 4, -0.25);
        assert_eq!(qtable.get(&state, 4), -0.25);
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new();
        let state = BoardState::new();
        qtable.set(&state, 0, 0.5);
        qtable.set(&state, 1, 1.5);
        qtable.set(&state, 2, 0.8);

        assert_eq!(qtable.max_q(&state, &[0, 1, 2]), 1.5);
    }

    #[test]
    fn test_max_q_full_board_is_zero() {
        let qtable = QTable::new();
        let full = BoardState::from_string("XOXXOOOXX").unwrap();
        assert_eq!(qtable.max_q(&full, &full.legal_actions()), 0.0);
    }

    #[test]
    fn test_max_q_unseen_action_reads_as_zero() {
        let mut qtable = QTable::new();
        let state = BoardState::new();
        qtable.set(&state, 0, -1.0);
        // Action 1 is unseen and reads as 0.0, dominating the stored loss.
        assert_eq!(qtable.max_q(&state, &[0, 1]), 0.0);
        // With only losses stored, the maximum stays negative.
        assert_eq!(qtable.max_q(&state, &[0]), -1.0);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new();
        let state = BoardState::new();
        let next_state = state.make_move(4).unwrap();

        qtable.set(&next_state, 1, 1.0);
        qtable.set(&next_state, 2, 2.0);

        qtable.q_learning_update(&state, 4, 0.0, &next_state, 0.5, 0.9);

        // Q(s,4) = 0.0 + 0.5 * (0.0 + 0.9 * 2.0 - 0.0) = 0.9
        let updated_q = qtable.get(&state, 4);
        assert!((updated_q - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_q_learning_update_terminal_reward() {
        let mut qtable = QTable::new();
        let prev = BoardState::from_string("XX OO    ").unwrap();
        let terminal = prev.make_move(2).unwrap();
        assert!(terminal.has_won(crate::tictactoe::Player::X));

        qtable.q_learning_update(&prev, 2, 1.0, &terminal, 0.5, 0.9);

        // Successor has no stored entries, so max_next is 0.0.
        assert!((qtable.get(&prev, 2) - 0.5).abs() < 1e-9);
    }
}
