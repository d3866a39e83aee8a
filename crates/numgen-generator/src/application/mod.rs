//! Application layer: command and query handlers over the shared state.

pub mod command_handlers;
pub mod gate;
pub mod persistence;
pub mod query_handlers;
