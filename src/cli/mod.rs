//! CLI infrastructure for the qttt trainer and advisor
//!
//! This module provides the command-line interface for training the
//! self-play policy and querying it for moves.

pub mod commands;
pub mod output;
