//! Tabular Q-learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe board model with validation
//! - Sparse Q-table with JSON persistence
//! - Epsilon-greedy self-play training loop with TD updates
//! - Read-only move advisor for interactive play

pub mod cli;
pub mod error;
pub mod q_learning;
pub mod tictactoe;
pub mod training;

pub use error::{Error, Result};
pub use q_learning::{MoveAdvisor, QTable};
pub use tictactoe::{BoardState, Cell, GameOutcome, Player};
pub use training::{Hyperparameters, SelfPlayTrainer, TrainingReport};
