//! Batch generation.

use numgen_core::clock::Clock;
use numgen_core::error::DomainError;
use numgen_core::rng::RandomSource;

use super::generator::{self, Draw};
use super::history::{EntryKind, History};
use super::range::Range;
use super::warnings::Warning;

/// Batch size used when the caller does not ask for one.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Largest batch a caller may request.
pub const MAX_BATCH_SIZE: usize = 1_000;

/// Numbers produced by one batch, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Generated numbers, oldest first.
    pub numbers: Vec<i64>,
    /// How many draws fell back to the whole range for lack of candidates.
    pub exhausted_draws: usize,
}

impl Batch {
    /// The exhaustion warning, if any draw in the batch raised it.
    #[must_use]
    pub fn warning(&self) -> Option<Warning> {
        (self.exhausted_draws > 0).then_some(Warning::ExhaustedRange)
    }
}

/// Number of draws a batch will make: never more than the range holds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn effective_count(range: Range, desired: usize) -> usize {
    (desired as u64).min(range.size()) as usize
}

/// Draws `min(desired, range.size())` numbers, appending each to `history`.
///
/// Exclusion sees the history plus every number already drawn in this
/// batch, even when the history cap has evicted some of them.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `desired` is zero or larger than
/// [`MAX_BATCH_SIZE`].
pub fn generate_batch(
    range: Range,
    exclude_seen: bool,
    history: &mut History,
    desired: usize,
    rng: &mut dyn RandomSource,
    clock: &dyn Clock,
) -> Result<Batch, DomainError> {
    if desired == 0 || desired > MAX_BATCH_SIZE {
        return Err(DomainError::Validation(format!(
            "batch size must be between 1 and {MAX_BATCH_SIZE}, got {desired}"
        )));
    }

    let count = effective_count(range, desired);
    let mut seen = generator::seen_in_range(range, history.numbers());
    let mut numbers = Vec::with_capacity(count);
    let mut exhausted_draws = 0;

    for _ in 0..count {
        let draw = if exclude_seen {
            generator::draw_excluding(range, &seen, rng)
        } else {
            Draw {
                number: generator::draw_uniform(range, rng),
                warning: None,
            }
        };
        if draw.warning.is_some() {
            exhausted_draws += 1;
        }
        seen.insert(draw.number);
        history.append(draw.number, range, EntryKind::Batch, clock);
        numbers.push(draw.number);
    }

    Ok(Batch {
        numbers,
        exhausted_draws,
    })
}
