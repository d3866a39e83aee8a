//! Derived statistics over the history.

use serde::Serialize;

use super::history::History;

/// Summary of the numbers currently in the history. All fields are zero for
/// an empty history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of entries.
    pub count: usize,
    /// Mean of the numbers, rounded to one decimal place.
    pub average: f64,
    /// Largest number.
    pub max: i64,
    /// Smallest number.
    pub min: i64,
}

impl Statistics {
    /// Computes statistics in a single pass over the history.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(history: &History) -> Self {
        let mut numbers = history.numbers();
        let Some(first) = numbers.next() else {
            return Self::default();
        };

        let (count, sum, min, max) = numbers.fold(
            (1_usize, i128::from(first), first, first),
            |(count, sum, min, max), n| (count + 1, sum + i128::from(n), min.min(n), max.max(n)),
        );

        let mean = sum as f64 / count as f64;
        Self {
            count,
            average: round_to_tenth(mean),
            max,
            min,
        }
    }
}

/// Rounds to one decimal on the exact binary value, so `0.15` (stored just
/// below) rounds down. Exact ties round away from zero.
fn round_to_tenth(value: f64) -> f64 {
    // Scaling by a power of two is exact; only quarters can tie at one decimal.
    if (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}
