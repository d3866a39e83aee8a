//! Shared test mocks and utilities for Numgen.

mod clock;
mod rng;
mod store;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingHistoryStore, InMemoryHistoryStore};
