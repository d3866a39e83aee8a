//! Command handlers for the generator.
//!
//! Each handler locks the shared state only around the synchronous domain
//! call, then hands a snapshot of the history to the [`HistoryPersister`].
//! Persistence is best-effort: a failed save is logged and never fails the
//! command.

use std::sync::{Mutex, MutexGuard};

use numgen_core::clock::Clock;
use numgen_core::command::Command;
use numgen_core::error::DomainError;
use numgen_core::rng::RandomSource;
use numgen_core::store::HistoryStore;
use tracing::{debug, info, warn};

use super::persistence::HistoryPersister;
use crate::domain::commands::{ClearHistory, GenerateBatch, GenerateNumber};
use crate::domain::history::{History, HistoryEntry};
use crate::domain::range::Range;
use crate::domain::reveal::RevealPlan;
use crate::domain::state::GeneratorState;
use crate::domain::statistics::Statistics;
use crate::domain::warnings::{HistoryOperation, Warning};

/// Result of a committed single generation.
#[derive(Debug, Clone)]
pub struct NumberGenerated {
    /// The appended entry.
    pub entry: HistoryEntry,
    /// Exhaustion warning, if the draw fell back.
    pub warning: Option<Warning>,
    /// Statistics after the append.
    pub statistics: Statistics,
}

/// Result of a committed batch.
#[derive(Debug, Clone)]
pub struct BatchGenerated {
    /// Numbers in generation order.
    pub numbers: Vec<i64>,
    /// Exhaustion warning, if any draw fell back.
    pub warning: Option<Warning>,
    /// Statistics after the batch.
    pub statistics: Statistics,
}

/// Result of a clear request.
#[derive(Debug, Clone, Copy)]
pub struct HistoryCleared {
    /// Entries removed.
    pub removed: usize,
    /// Set when there was nothing to clear.
    pub warning: Option<Warning>,
}

pub(crate) fn lock<'a, T: ?Sized>(
    mutex: &'a Mutex<T>,
    what: &str,
) -> Result<MutexGuard<'a, T>, DomainError> {
    mutex
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("{what} mutex poisoned: {e}")))
}

/// Restores the generator state from the store at startup.
///
/// Load failures and malformed content both yield an empty history.
pub async fn restore_state(store: &dyn HistoryStore) -> GeneratorState {
    let stored = match store.load().await {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "failed to load persisted history; starting empty");
            return GeneratorState::new();
        }
    };

    match History::from_stored(&stored) {
        Ok(history) => {
            info!(entries = history.len(), "restored persisted history");
            GeneratorState::with_history(history)
        }
        Err(e) => {
            debug!(error = %e, "discarding malformed persisted history");
            GeneratorState::new()
        }
    }
}

/// Draws the cosmetic frames of an animated reveal. The history is not
/// touched.
///
/// # Errors
///
/// Returns the range errors of [`Range::new`], or
/// `DomainError::Infrastructure` if the RNG mutex is poisoned.
pub fn draw_reveal_frames(
    min: i64,
    max: i64,
    plan: RevealPlan,
    rng: &Mutex<dyn RandomSource + Send>,
) -> Result<Vec<i64>, DomainError> {
    let range = Range::new(min, max)?;
    let mut rng_guard = lock(rng, "RNG")?;
    Ok(plan.frames(range, &mut *rng_guard).collect())
}

/// Handles the `GenerateNumber` command: validates the range, draws and
/// appends the number, and persists the history.
///
/// # Errors
///
/// Returns the range errors of [`Range::new`] (nothing is mutated), or
/// `DomainError::Infrastructure` if a mutex is poisoned.
pub async fn handle_generate_number(
    command: &GenerateNumber,
    state: &Mutex<GeneratorState>,
    clock: &dyn Clock,
    rng: &Mutex<dyn RandomSource + Send>,
    persister: &HistoryPersister,
) -> Result<NumberGenerated, DomainError> {
    let range = Range::new(command.min, command.max)?;
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %range,
        exclude_seen = command.exclude_seen,
        "handling command"
    );

    // Lock only for the synchronous domain call, never across an await.
    let (generated, statistics, snapshot) = {
        let mut rng_guard = lock(rng, "RNG")?;
        let mut state_guard = lock(state, "generator state")?;
        let generated = state_guard.generate(range, command.exclude_seen, &mut *rng_guard, clock);
        (
            generated,
            *state_guard.statistics(),
            state_guard.snapshot(),
        )
    };

    debug!(number = generated.entry.number(), "number generated");
    persister.persist(snapshot).await;

    Ok(NumberGenerated {
        entry: generated.entry,
        warning: generated.warning,
        statistics,
    })
}

/// Handles the `GenerateBatch` command.
///
/// # Errors
///
/// Returns the range errors of [`Range::new`], `DomainError::Validation` for
/// an invalid batch size, or `DomainError::Infrastructure` if a mutex is
/// poisoned.
pub async fn handle_generate_batch(
    command: &GenerateBatch,
    state: &Mutex<GeneratorState>,
    clock: &dyn Clock,
    rng: &Mutex<dyn RandomSource + Send>,
    persister: &HistoryPersister,
) -> Result<BatchGenerated, DomainError> {
    let range = Range::new(command.min, command.max)?;
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %range,
        count = command.count,
        exclude_seen = command.exclude_seen,
        "handling command"
    );

    let (batch, statistics, snapshot) = {
        let mut rng_guard = lock(rng, "RNG")?;
        let mut state_guard = lock(state, "generator state")?;
        let batch = state_guard.generate_batch(
            range,
            command.exclude_seen,
            command.count,
            &mut *rng_guard,
            clock,
        )?;
        (
            batch,
            *state_guard.statistics(),
            state_guard.snapshot(),
        )
    };

    persister.persist(snapshot).await;

    Ok(BatchGenerated {
        warning: batch.warning(),
        numbers: batch.numbers,
        statistics,
    })
}

/// Handles the `ClearHistory` command. An empty history is left alone and
/// reported with a warning.
///
/// # Errors
///
/// Returns `DomainError::ConfirmationRequired` if the command is not
/// confirmed, or `DomainError::Infrastructure` if the mutex is poisoned.
pub async fn handle_clear_history(
    command: &ClearHistory,
    state: &Mutex<GeneratorState>,
    persister: &HistoryPersister,
) -> Result<HistoryCleared, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        confirmed = command.confirmed,
        "handling command"
    );

    if !command.confirmed {
        return Err(DomainError::ConfirmationRequired);
    }

    let (removed, snapshot) = {
        let mut state_guard = lock(state, "generator state")?;
        if state_guard.history().is_empty() {
            return Ok(HistoryCleared {
                removed: 0,
                warning: Some(Warning::EmptyHistory(HistoryOperation::Clear)),
            });
        }
        (state_guard.clear(), state_guard.snapshot())
    };

    persister.persist(snapshot).await;

    Ok(HistoryCleared {
        removed,
        warning: None,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};
    use numgen_core::rng::RandomSource;
    use numgen_core::store::StoredEntry;
    use uuid::Uuid;

    use super::*;
    use numgen_test_support::{
        FailingHistoryStore, FixedClock, InMemoryHistoryStore, MockRng, SequenceRng,
    };

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn mock_rng() -> Mutex<MockRng> {
        Mutex::new(MockRng)
    }

    fn generate(min: i64, max: i64, exclude_seen: bool) -> GenerateNumber {
        GenerateNumber {
            correlation_id: Uuid::new_v4(),
            min,
            max,
            exclude_seen,
        }
    }

    fn stored(number: i64, range: &str) -> StoredEntry {
        StoredEntry {
            id: Uuid::new_v4(),
            number,
            range: range.to_owned(),
            timestamp: "2026-01-14 09:00:00 UTC".to_owned(),
            kind: "single".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_handle_generate_number_appends_and_persists() {
        let state = Mutex::new(GeneratorState::new());
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![0.5]));
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());

        let result = handle_generate_number(
            &generate(1, 10, false),
            &state,
            &fixed_clock(),
            &rng,
            &persister,
        )
        .await
        .unwrap();

        assert_eq!(result.entry.number(), 6);
        assert_eq!(result.entry.timestamp(), "2026-01-15 10:00:00 UTC");
        assert!(result.warning.is_none());
        assert_eq!(result.statistics.count, 1);

        let persisted = store.entries();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].number, 6);
        assert_eq!(persisted[0].range, "1 - 10");
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_handle_generate_number_rejects_invalid_range_without_mutation() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());

        let result = handle_generate_number(
            &generate(10, 10, false),
            &state,
            &fixed_clock(),
            &mock_rng(),
            &persister,
        )
        .await;

        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
        assert!(state.lock().unwrap().history().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_handle_generate_number_reports_exhaustion() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        let clock = fixed_clock();
        let rng = mock_rng();

        for _ in 0..2 {
            handle_generate_number(&generate(1, 2, true), &state, &clock, &rng, &persister)
                .await
                .unwrap();
        }
        let third =
            handle_generate_number(&generate(1, 2, true), &state, &clock, &rng, &persister)
                .await
                .unwrap();

        assert_eq!(third.warning, Some(Warning::ExhaustedRange));
        assert_eq!(third.statistics.count, 3);
    }

    #[tokio::test]
    async fn test_handle_generate_number_survives_failing_store() {
        let state = Mutex::new(GeneratorState::new());

        let result = handle_generate_number(
            &generate(1, 10, false),
            &state,
            &fixed_clock(),
            &mock_rng(),
            &HistoryPersister::new(Arc::new(FailingHistoryStore)),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(state.lock().unwrap().history().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_generate_batch_caps_count_and_persists() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        let command = GenerateBatch {
            correlation_id: Uuid::new_v4(),
            min: 1,
            max: 5,
            exclude_seen: true,
            count: 10,
        };

        let result =
            handle_generate_batch(&command, &state, &fixed_clock(), &mock_rng(), &persister)
                .await
                .unwrap();

        assert_eq!(result.numbers, vec![1, 2, 3, 4, 5]);
        assert!(result.warning.is_none());
        assert_eq!(result.statistics.count, 5);
        assert_eq!(store.entries().len(), 5);
        assert!(store.entries().iter().all(|e| e.kind == "batch"));
    }

    #[tokio::test]
    async fn test_handle_generate_batch_rejects_zero_count() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        let command = GenerateBatch {
            correlation_id: Uuid::new_v4(),
            min: 1,
            max: 5,
            exclude_seen: false,
            count: 0,
        };

        let result =
            handle_generate_batch(&command, &state, &fixed_clock(), &mock_rng(), &persister)
                .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_handle_clear_history_requires_confirmation() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        handle_generate_number(
            &generate(1, 10, false),
            &state,
            &fixed_clock(),
            &mock_rng(),
            &persister,
        )
        .await
        .unwrap();

        let command = ClearHistory {
            correlation_id: Uuid::new_v4(),
            confirmed: false,
        };
        let result = handle_clear_history(&command, &state, &persister).await;

        assert!(matches!(result, Err(DomainError::ConfirmationRequired)));
        assert_eq!(state.lock().unwrap().history().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_clear_history_empties_store() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        handle_generate_number(
            &generate(1, 10, false),
            &state,
            &fixed_clock(),
            &mock_rng(),
            &persister,
        )
        .await
        .unwrap();

        let command = ClearHistory {
            correlation_id: Uuid::new_v4(),
            confirmed: true,
        };
        let result = handle_clear_history(&command, &state, &persister).await.unwrap();

        assert_eq!(result.removed, 1);
        assert!(result.warning.is_none());
        assert!(store.entries().is_empty());
        assert_eq!(state.lock().unwrap().statistics().count, 0);
    }

    #[tokio::test]
    async fn test_handle_clear_history_on_empty_history_warns() {
        let state = Mutex::new(GeneratorState::new());
        let store = Arc::new(InMemoryHistoryStore::default());
        let persister = HistoryPersister::new(store.clone());
        let command = ClearHistory {
            correlation_id: Uuid::new_v4(),
            confirmed: true,
        };

        let result = handle_clear_history(&command, &state, &persister).await.unwrap();

        assert_eq!(result.removed, 0);
        assert_eq!(
            result.warning,
            Some(Warning::EmptyHistory(HistoryOperation::Clear))
        );
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_state_loads_history_and_statistics() {
        let store = InMemoryHistoryStore::new(vec![stored(7, "1 - 10"), stored(3, "1 - 10")]);

        let state = restore_state(&store).await;

        let numbers: Vec<i64> = state.history().numbers().collect();
        assert_eq!(numbers, vec![7, 3]);
        assert_eq!(state.statistics().count, 2);
        assert!((state.statistics().average - 5.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_restore_state_discards_malformed_history() {
        let store = InMemoryHistoryStore::new(vec![stored(7, "1 - 10"), stored(3, "ten")]);

        let state = restore_state(&store).await;

        assert!(state.history().is_empty());
    }

    #[tokio::test]
    async fn test_restore_state_starts_empty_when_load_fails() {
        let state = restore_state(&FailingHistoryStore).await;

        assert!(state.history().is_empty());
    }

    #[test]
    fn test_draw_reveal_frames_leaves_history_alone() {
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![0.0, 0.5, 0.9]));
        let plan = RevealPlan::new(3, std::time::Duration::ZERO);

        let frames = draw_reveal_frames(1, 10, plan, &rng).unwrap();

        assert_eq!(frames, vec![1, 6, 10]);
    }

    #[test]
    fn test_draw_reveal_frames_rejects_invalid_range() {
        let result = draw_reveal_frames(3, 1, RevealPlan::default(), &mock_rng());

        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_lock_reports_poisoned_mutex() {
        let rng: Mutex<MockRng> = Mutex::new(MockRng);
        let _ = std::panic::catch_unwind(|| {
            let _guard = rng.lock().unwrap();
            panic!("poison");
        });

        let result = lock::<dyn RandomSource + Send>(&rng, "RNG");

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
