//! Numgen Core — shared abstractions.
//!
//! This crate defines the traits and types the generator, the history store
//! and the HTTP adapter all depend on. It contains no I/O.

pub mod clock;
pub mod command;
pub mod error;
pub mod rng;
pub mod store;
