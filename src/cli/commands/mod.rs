//! Command implementations

pub mod advise;
pub mod train;
