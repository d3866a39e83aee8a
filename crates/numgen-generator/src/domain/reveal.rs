//! Animated reveal: cosmetic intermediate values shown before the final
//! number is committed.

use std::time::Duration;

use numgen_core::rng::RandomSource;

use super::generator::draw_uniform;
use super::range::Range;

/// Default number of intermediate frames.
pub const DEFAULT_REVEAL_STEPS: u32 = 20;

/// Default total reveal duration.
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(1_000);

/// How a reveal is paced. The plan is reusable; every call to
/// [`RevealPlan::frames`] starts a fresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPlan {
    steps: u32,
    duration: Duration,
}

impl RevealPlan {
    /// Creates a plan of `steps` frames spread over `duration`.
    #[must_use]
    pub fn new(steps: u32, duration: Duration) -> Self {
        Self { steps, duration }
    }

    /// A plan with no frames and no delay.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Number of intermediate frames.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Total reveal duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Delay between consecutive frames.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }

    /// Intermediate values: unfiltered draws over `range`. They never touch
    /// the history.
    pub fn frames<'a>(&self, range: Range, rng: &'a mut dyn RandomSource) -> RevealFrames<'a> {
        RevealFrames {
            range,
            remaining: self.steps,
            rng,
        }
    }
}

impl Default for RevealPlan {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_STEPS, DEFAULT_REVEAL_DURATION)
    }
}

/// Finite iterator over the intermediate frames of one reveal.
pub struct RevealFrames<'a> {
    range: Range,
    remaining: u32,
    rng: &'a mut dyn RandomSource,
}

impl Iterator for RevealFrames<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(draw_uniform(self.range, self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RevealFrames<'_> {}
