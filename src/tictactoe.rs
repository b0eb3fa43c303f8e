//! Tic-Tac-Toe board model
//!
//! Pure game logic with no learning or rendering concerns: board state
//! encoding, legal-action enumeration, and terminal-outcome detection.

pub mod board;
pub mod lines;

pub use board::{BoardState, Cell, GameOutcome, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
