//! Capped, newest-first history of generated numbers.

use std::collections::VecDeque;

use numgen_core::clock::Clock;
use numgen_core::error::DomainError;
use numgen_core::store::StoredEntry;
use serde::Serialize;
use uuid::Uuid;

use super::range::Range;

/// Maximum number of entries kept; older entries are evicted.
pub const HISTORY_CAPACITY: usize = 50;

/// How an entry was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A single generation, animated or not.
    Single,
    /// One member of a batch generation.
    Batch,
}

impl EntryKind {
    /// Stored name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
        }
    }

    fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "single" => Ok(Self::Single),
            "batch" => Ok(Self::Batch),
            other => Err(DomainError::Validation(format!(
                "unknown history entry type: {other}"
            ))),
        }
    }
}

/// One generated number. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: Uuid,
    number: i64,
    range: Range,
    timestamp: String,
    kind: EntryKind,
}

impl HistoryEntry {
    /// Unique, time-ordered identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The generated number.
    #[must_use]
    pub fn number(&self) -> i64 {
        self.number
    }

    /// The `"min - max"` label of the range.
    #[must_use]
    pub fn range_label(&self) -> String {
        self.range.label()
    }

    /// Human-readable creation time.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// How the entry was produced.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Converts the entry to its persisted form.
    #[must_use]
    pub fn to_stored(&self) -> StoredEntry {
        StoredEntry {
            id: self.id,
            number: self.number,
            range: self.range.label(),
            timestamp: self.timestamp.clone(),
            kind: self.kind.as_str().to_owned(),
        }
    }

    /// Rebuilds an entry from its persisted form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` (or a range error) if the label does
    /// not parse, the number lies outside the range, or the type is unknown.
    pub fn from_stored(stored: &StoredEntry) -> Result<Self, DomainError> {
        let range = Range::parse_label(&stored.range)?;
        if !range.contains(stored.number) {
            return Err(DomainError::Validation(format!(
                "stored number {} lies outside {}",
                stored.number, stored.range
            )));
        }
        Ok(Self {
            id: stored.id,
            number: stored.number,
            range,
            timestamp: stored.timestamp.clone(),
            kind: EntryKind::parse(&stored.kind)?,
        })
    }
}

/// Ordered history, newest first, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new entry stamped with the clock's current time, evicting
    /// the oldest entries beyond capacity. Returns the new entry.
    pub fn append(
        &mut self,
        number: i64,
        range: Range,
        kind: EntryKind,
        clock: &dyn Clock,
    ) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::now_v7(),
            number,
            range,
            timestamp: clock.timestamp(),
            kind,
        };
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
        &self.entries[0]
    }

    /// Removes every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Generated numbers, newest first.
    pub fn numbers(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(HistoryEntry::number)
    }

    /// Converts the history to its persisted form, newest first.
    #[must_use]
    pub fn to_stored(&self) -> Vec<StoredEntry> {
        self.entries.iter().map(HistoryEntry::to_stored).collect()
    }

    /// Rebuilds a history from persisted entries (newest first), keeping at
    /// most [`HISTORY_CAPACITY`] of them.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error; a partially valid history is
    /// never returned.
    pub fn from_stored(stored: &[StoredEntry]) -> Result<Self, DomainError> {
        let entries = stored
            .iter()
            .take(HISTORY_CAPACITY)
            .map(HistoryEntry::from_stored)
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { entries })
    }
}
