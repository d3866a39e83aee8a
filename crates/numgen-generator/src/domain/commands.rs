//! Commands accepted by the generator.

use numgen_core::command::Command;
use uuid::Uuid;

/// Command to draw and commit a single number.
#[derive(Debug, Clone)]
pub struct GenerateNumber {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
    /// Skip values already in the history.
    pub exclude_seen: bool,
}

impl Command for GenerateNumber {
    fn command_type(&self) -> &'static str {
        "generator.generate_number"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to draw and commit several numbers at once.
#[derive(Debug, Clone)]
pub struct GenerateBatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
    /// Skip values already in the history or earlier in the batch.
    pub exclude_seen: bool,
    /// Requested number of draws, capped at the range size.
    pub count: usize,
}

impl Command for GenerateBatch {
    fn command_type(&self) -> &'static str {
        "generator.generate_batch"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to empty the history.
#[derive(Debug, Clone)]
pub struct ClearHistory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user confirmed the irreversible clear.
    pub confirmed: bool,
}

impl Command for ClearHistory {
    fn command_type(&self) -> &'static str {
        "generator.clear_history"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
