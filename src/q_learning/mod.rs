//! Tabular Q-learning: value table, action selection, and the move advisor
//!
//! The Q-table maps `(state, action)` pairs to expected-return estimates
//! learned by one-step temporal difference updates. Absent entries read as
//! 0.0; the table only grows through training, never through queries.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qttt::q_learning::{MoveAdvisor, QTable};
//! use qttt::tictactoe::BoardState;
//!
//! let table = QTable::load_from_file("q_table.json").unwrap();
//! let mut advisor = MoveAdvisor::new(table);
//! let board = BoardState::new();
//! let best = advisor.choose_best_action(&board);
//! assert!(best.is_some());
//! ```

pub mod advisor;
pub mod policy;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use advisor::MoveAdvisor;
pub use policy::{epsilon_greedy_action, greedy_action};
pub use q_table::QTable;
