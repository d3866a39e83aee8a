//! Numgen — range generation, history and statistics.
//!
//! Draws uniform integers from an inclusive range, optionally skipping
//! values already in the history, keeps a capped newest-first history with
//! derived statistics, and exports it as CSV.

pub mod application;
pub mod domain;
