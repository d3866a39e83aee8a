//! Inclusive integer ranges.

use std::fmt;

use numgen_core::error::DomainError;
use serde::Serialize;

/// Absolute limit for either bound of a range.
pub const RANGE_LIMIT: i64 = 999_999;

/// An inclusive `[min, max]` interval with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    min: i64,
    max: i64,
}

impl Range {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `min >= max`, and
    /// `DomainError::RangeOutOfBounds` if either bound lies outside
    /// `[-RANGE_LIMIT, RANGE_LIMIT]`.
    pub fn new(min: i64, max: i64) -> Result<Self, DomainError> {
        if min >= max {
            return Err(DomainError::InvalidRange { min, max });
        }
        if min < -RANGE_LIMIT || max > RANGE_LIMIT {
            return Err(DomainError::RangeOutOfBounds {
                min,
                max,
                limit: RANGE_LIMIT,
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of integers in the range.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn size(&self) -> u64 {
        (self.max - self.min + 1) as u64
    }

    /// Whether `value` lies inside the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The `"min - max"` label used in history and exports.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Parses a `"min - max"` label back into a range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the label is not two integers
    /// separated by `" - "`, or the range errors of [`Range::new`].
    pub fn parse_label(label: &str) -> Result<Self, DomainError> {
        let (min, max) = label
            .split_once(" - ")
            .ok_or_else(|| DomainError::Validation(format!("malformed range label: {label}")))?;
        let parse = |raw: &str| {
            raw.trim()
                .parse::<i64>()
                .map_err(|e| DomainError::Validation(format!("malformed range label {label}: {e}")))
        };
        Self::new(parse(min)?, parse(max)?)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
