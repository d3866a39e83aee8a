//! History store abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Fixed key under which history is persisted.
pub const HISTORY_KEY: &str = "randomNumberHistory";

fn default_kind() -> String {
    "single".to_owned()
}

/// Stored representation of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The generated number.
    pub number: i64,
    /// Range label, `"min - max"`.
    pub range: String,
    /// Human-readable creation time.
    pub timestamp: String,
    /// How the entry was produced (`single` or `batch`).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

/// Capability for loading and saving the persisted history.
///
/// Persistence is best-effort: callers log save failures and carry on.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the persisted history, newest first.
    ///
    /// A missing or malformed value loads as an empty history.
    async fn load(&self) -> Result<Vec<StoredEntry>, DomainError>;

    /// Replace the persisted history with `entries`.
    async fn save(&self, entries: &[StoredEntry]) -> Result<(), DomainError>;
}
