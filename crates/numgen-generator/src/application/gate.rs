//! In-progress flag for single-number generation.
//!
//! A request that finds the gate held is dropped, not queued. The permit owns
//! a handle to the gate so it can travel into a spawned task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a single-number generation is in flight.
#[derive(Debug, Default)]
pub struct GenerationGate {
    in_progress: AtomicBool,
}

impl GenerationGate {
    /// Creates an open gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate, or returns `None` if a generation is in flight.
    #[must_use]
    pub fn try_acquire(self: &Arc<Self>) -> Option<GenerationPermit> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GenerationPermit {
                gate: Arc::clone(self),
            })
    }

    /// Whether a generation is currently in flight.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

/// Held for the duration of one generation; releases the gate on drop.
#[derive(Debug)]
pub struct GenerationPermit {
    gate: Arc<GenerationGate>,
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.gate.in_progress.store(false, Ordering::Release);
    }
}
