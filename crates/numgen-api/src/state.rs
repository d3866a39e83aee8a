//! Shared application state.

use std::sync::{Arc, Mutex};

use numgen_core::clock::Clock;
use numgen_core::rng::RandomSource;
use numgen_core::store::HistoryStore;
use numgen_generator::application::gate::GenerationGate;
use numgen_generator::application::persistence::HistoryPersister;
use numgen_generator::domain::reveal::RevealPlan;
use numgen_generator::domain::state::GeneratorState;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Time source for history timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Random source; locked only for synchronous draws.
    pub rng: Arc<Mutex<dyn RandomSource + Send>>,
    /// Ordered persistence for the history.
    pub persister: Arc<HistoryPersister>,
    /// The single generator state owned by this server.
    pub generator: Arc<Mutex<GeneratorState>>,
    /// In-progress flag for single-number generation.
    pub gate: Arc<GenerationGate>,
    /// Pacing of animated reveals.
    pub reveal: RevealPlan,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn RandomSource + Send>>,
        history_store: Arc<dyn HistoryStore>,
        generator: GeneratorState,
        reveal: RevealPlan,
    ) -> Self {
        Self {
            clock,
            rng,
            persister: Arc::new(HistoryPersister::new(history_store)),
            generator: Arc::new(Mutex::new(generator)),
            gate: Arc::new(GenerationGate::new()),
            reveal,
        }
    }
}
