//! Domain model: pure operations over ranges, history and statistics.

pub mod batch;
pub mod commands;
pub mod export;
pub mod generator;
pub mod history;
pub mod range;
pub mod reveal;
pub mod state;
pub mod statistics;
pub mod warnings;
