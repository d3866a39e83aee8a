//! Query handlers for the generator.
//!
//! Read-only views over the shared state, plus the CSV export.

use std::sync::Mutex;

use numgen_core::clock::Clock;
use numgen_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use super::command_handlers::lock;
use crate::domain::export;
use crate::domain::history::{EntryKind, HistoryEntry};
use crate::domain::state::{GeneratorState, Settings};
use crate::domain::statistics::Statistics;
use crate::domain::warnings::{HistoryOperation, Warning};

/// Read-only view of a history entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    /// The entry identifier.
    pub id: Uuid,
    /// The generated number.
    pub number: i64,
    /// Range label, `"min - max"`.
    pub range: String,
    /// Human-readable creation time.
    pub timestamp: String,
    /// `single` or `batch`.
    pub kind: EntryKind,
}

impl From<&HistoryEntry> for EntryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id(),
            number: entry.number(),
            range: entry.range_label(),
            timestamp: entry.timestamp().to_owned(),
            kind: entry.kind(),
        }
    }
}

/// Read-only view of the whole history.
#[derive(Debug, Serialize)]
pub struct HistoryView {
    /// Entries, newest first.
    pub entries: Vec<EntryView>,
    /// Statistics over the entries.
    pub statistics: Statistics,
}

/// Outcome of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The rendered CSV document.
    Csv {
        /// Suggested download name.
        file_name: String,
        /// CSV content.
        content: String,
    },
    /// Nothing to export.
    Empty(Warning),
}

/// Returns the history with its statistics.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the state mutex is poisoned.
pub fn get_history(state: &Mutex<GeneratorState>) -> Result<HistoryView, DomainError> {
    let state = lock(state, "generator state")?;
    Ok(HistoryView {
        entries: state.history().iter().map(EntryView::from).collect(),
        statistics: *state.statistics(),
    })
}

/// Returns the statistics over the current history.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the state mutex is poisoned.
pub fn get_statistics(state: &Mutex<GeneratorState>) -> Result<Statistics, DomainError> {
    Ok(*lock(state, "generator state")?.statistics())
}

/// Returns the last used settings.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the state mutex is poisoned.
pub fn get_settings(state: &Mutex<GeneratorState>) -> Result<Settings, DomainError> {
    Ok(*lock(state, "generator state")?.settings())
}

/// Renders the history as CSV. An empty history is reported, not exported.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the state mutex is poisoned.
pub fn export_history(
    state: &Mutex<GeneratorState>,
    clock: &dyn Clock,
) -> Result<ExportOutcome, DomainError> {
    let state = lock(state, "generator state")?;
    if state.history().is_empty() {
        return Ok(ExportOutcome::Empty(Warning::EmptyHistory(
            HistoryOperation::Export,
        )));
    }
    Ok(ExportOutcome::Csv {
        file_name: export::export_file_name(clock),
        content: export::to_csv(state.history()),
    })
}
