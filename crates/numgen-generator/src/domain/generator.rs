//! Uniform range draws with optional exclusion of seen values.

use std::collections::BTreeSet;

use numgen_core::rng::RandomSource;
use tracing::debug;

use super::history::History;
use super::range::Range;
use super::warnings::Warning;

/// The outcome of one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// The drawn number, always inside the requested range.
    pub number: i64,
    /// Set when exclusion was requested but no candidates remained.
    pub warning: Option<Warning>,
}

/// Draws uniformly from the whole range: `floor(random() * size) + min`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn draw_uniform(range: Range, rng: &mut dyn RandomSource) -> i64 {
    range.min() + rng.pick_index(range.size()) as i64
}

/// Draws a number from `range`.
///
/// With `exclude_seen`, values already present in `history` are skipped; if
/// none remain, the draw falls back to the whole range and reports
/// [`Warning::ExhaustedRange`].
#[must_use]
pub fn generate(
    range: Range,
    exclude_seen: bool,
    history: &History,
    rng: &mut dyn RandomSource,
) -> Draw {
    if !exclude_seen || history.is_empty() {
        return Draw {
            number: draw_uniform(range, rng),
            warning: None,
        };
    }

    let seen = seen_in_range(range, history.numbers());
    draw_excluding(range, &seen, rng)
}

/// Collects the distinct values of `numbers` that fall inside `range`.
pub(crate) fn seen_in_range(range: Range, numbers: impl Iterator<Item = i64>) -> BTreeSet<i64> {
    numbers.filter(|n| range.contains(*n)).collect()
}

/// Picks uniformly among the values of `range` absent from `seen`.
///
/// `seen` must only hold values inside `range`. The candidate of rank `k`
/// (ascending) is found by walking the sorted seen values, so the range is
/// never enumerated.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn draw_excluding(
    range: Range,
    seen: &BTreeSet<i64>,
    rng: &mut dyn RandomSource,
) -> Draw {
    let available = range.size() - seen.len() as u64;
    if available == 0 {
        debug!(%range, "no unseen values left, falling back to an unfiltered draw");
        return Draw {
            number: draw_uniform(range, rng),
            warning: Some(Warning::ExhaustedRange),
        };
    }

    let rank = rng.pick_index(available);
    let mut candidate = range.min() + rank as i64;
    for &value in seen {
        if value > candidate {
            break;
        }
        candidate += 1;
    }

    Draw {
        number: candidate,
        warning: None,
    }
}
