//! Action selection over a Q-table: greedy and ε-greedy.

use rand::{Rng, seq::IndexedRandom};

use crate::{q_learning::q_table::QTable, tictactoe::BoardState};

/// Select the best-valued legal action for a state.
///
/// Returns `None` when the board is full. Ties are broken toward the lowest
/// position index, with one exception: when every legal action's value is
/// exactly 0.0 the table carries no signal for this state, and the choice
/// is uniform random instead. Without that rule an untrained table would
/// always answer with the lowest empty cell, which a human opponent can
/// exploit.
pub fn greedy_action<R: Rng + ?Sized>(
    table: &QTable,
    state: &BoardState,
    rng: &mut R,
) -> Option<usize> {
    let legal = state.legal_actions();
    if legal.is_empty() {
        return None;
    }

    if legal.iter().all(|&action| table.get(state, action) == 0.0) {
        return legal.choose(rng).copied();
    }

    let mut best = legal[0];
    let mut best_q = table.get(state, best);
    for &action in &legal[1..] {
        let q = table.get(state, action);
        if q > best_q {
            best = action;
            best_q = q;
        }
    }
    Some(best)
}

/// ε-greedy action selection.
///
/// With probability `epsilon` returns a uniformly random legal action,
/// otherwise delegates to [`greedy_action`]. Returns `None` when the board
/// is full.
pub fn epsilon_greedy_action<R: Rng + ?Sized>(
    table: &QTable,
    state: &BoardState,
    epsilon: f64,
    rng: &mut R,
) -> Option<usize> {
    let legal = state.legal_actions();
    if legal.is_empty() {
        return None;
    }

    if rng.random::<f64>() < epsilon {
        legal.choose(rng).copied()
    } else {
        greedy_action(table, state, rng)
    }
}
