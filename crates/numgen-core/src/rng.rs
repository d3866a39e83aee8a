//! Random number source abstraction.
//!
//! In production, this wraps a seeded or OS-seeded `StdRng`. In tests,
//! a scripted implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
///
/// Not suitable for cryptographic use.
pub trait RandomSource: Send + Sync {
    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Picks an index in `[0, len)` as `floor(next_f64() * len)`.
    ///
    /// `len` must be non-zero. Out-of-contract values from `next_f64` are
    /// clamped into the valid index range.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn pick_index(&mut self, len: u64) -> u64 {
        debug_assert!(len > 0, "pick_index requires a non-empty range");
        let scaled = (self.next_f64() * len as f64).floor() as u64;
        scaled.min(len.saturating_sub(1))
    }
}

/// Production random source backed by `rand::rngs::StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
