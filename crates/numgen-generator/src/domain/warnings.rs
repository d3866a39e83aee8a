//! Non-fatal conditions reported next to successful results.

use std::fmt;

/// The history operation a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOperation {
    /// Clearing the history.
    Clear,
    /// Exporting the history as CSV.
    Export,
}

/// A recoverable condition the caller should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// Exclude-seen was requested but every value in the range is already in
    /// the history; an unfiltered draw was made instead.
    ExhaustedRange,
    /// The operation was skipped because the history is empty.
    EmptyHistory(HistoryOperation),
}

impl Warning {
    /// Machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ExhaustedRange => "exhausted_range",
            Self::EmptyHistory(_) => "empty_history",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhaustedRange => f.write_str("No more unique numbers available in this range"),
            Self::EmptyHistory(HistoryOperation::Clear) => f.write_str("No history to clear"),
            Self::EmptyHistory(HistoryOperation::Export) => f.write_str("No history to export"),
        }
    }
}
