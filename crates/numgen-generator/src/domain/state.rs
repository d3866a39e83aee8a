//! The generator state: settings, history and statistics kept together.

use numgen_core::clock::Clock;
use numgen_core::error::DomainError;
use numgen_core::rng::RandomSource;
use numgen_core::store::StoredEntry;
use serde::Serialize;

use super::batch::{self, Batch};
use super::generator;
use super::history::{EntryKind, History, HistoryEntry};
use super::range::Range;
use super::statistics::Statistics;
use super::warnings::Warning;

/// Last used generation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Range of the last generation (defaults to `1 - 100`).
    pub range: Range,
    /// Whether the last generation excluded seen values.
    pub exclude_seen: bool,
}

/// Result of committing a single number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The entry appended to the history.
    pub entry: HistoryEntry,
    /// Exhaustion warning, if the draw fell back.
    pub warning: Option<Warning>,
}

/// The persisted form of the history at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    /// Revision of the state the snapshot was taken from.
    pub revision: u64,
    /// Entries, newest first.
    pub entries: Vec<StoredEntry>,
}

/// Settings, history and statistics. Statistics are recomputed on every
/// history mutation, so they always describe the current history.
///
/// The revision increases by one on every history mutation.
#[derive(Debug, Clone, Default)]
pub struct GeneratorState {
    settings: Settings,
    history: History,
    statistics: Statistics,
    revision: u64,
}

impl GeneratorState {
    /// Creates a state with an empty history and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state around a restored history.
    #[must_use]
    pub fn with_history(history: History) -> Self {
        let statistics = Statistics::compute(&history);
        Self {
            settings: Settings::default(),
            history,
            statistics,
            revision: 0,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Statistics over the current history.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Number of history mutations since the state was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The history in persisted form, stamped with the current revision.
    #[must_use]
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            revision: self.revision,
            entries: self.history.to_stored(),
        }
    }

    /// Draws one number and appends it to the history.
    pub fn generate(
        &mut self,
        range: Range,
        exclude_seen: bool,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> Generated {
        let draw = generator::generate(range, exclude_seen, &self.history, rng);
        let entry = self
            .history
            .append(draw.number, range, EntryKind::Single, clock)
            .clone();
        self.settings = Settings {
            range,
            exclude_seen,
        };
        self.refresh();
        Generated {
            entry,
            warning: draw.warning,
        }
    }

    /// Draws a batch and appends every number to the history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an invalid batch size; the state
    /// is left untouched in that case.
    pub fn generate_batch(
        &mut self,
        range: Range,
        exclude_seen: bool,
        desired: usize,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> Result<Batch, DomainError> {
        let batch =
            batch::generate_batch(range, exclude_seen, &mut self.history, desired, rng, clock)?;
        self.settings = Settings {
            range,
            exclude_seen,
        };
        self.refresh();
        Ok(batch)
    }

    /// Empties the history and returns how many entries were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.history.clear();
        self.refresh();
        removed
    }

    fn refresh(&mut self) {
        self.statistics = Statistics::compute(&self.history);
        self.revision += 1;
    }
}
