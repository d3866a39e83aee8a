//! JSON-file implementation of the `HistoryStore` trait.
//!
//! The file holds a JSON object used as a small key-value store; the history
//! lives under one key and other keys are preserved on save.
//!
//! Saves are serialized through an async lock and replace the file with a
//! rename, so a reader never observes a partially written document.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use numgen_core::error::DomainError;
use numgen_core::store::{HISTORY_KEY, HistoryStore, StoredEntry};

/// File-backed history store.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    key: String,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Creates a store at `path` using the default history key.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, HISTORY_KEY)
    }

    /// Creates a store at `path` that keeps the history under `key`.
    #[must_use]
    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the backing document. A missing or malformed file reads as
    /// `None`.
    async fn read_document(&self) -> Result<Option<Map<String, Value>>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring malformed store file");
                Ok(None)
            }
        }
    }
}

/// Writes `bytes` to a temporary file next to `path`, then renames it over
/// `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Decodes the stored history. Browser-style stores keep the history as a
/// JSON string, so a string value is decoded a second time.
fn decode_entries(value: Value) -> Result<Vec<StoredEntry>, serde_json::Error> {
    match value {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<Vec<StoredEntry>, DomainError> {
        let Some(mut document) = self.read_document().await? else {
            return Ok(Vec::new());
        };
        let Some(value) = document.remove(&self.key) else {
            return Ok(Vec::new());
        };

        match decode_entries(value) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                debug!(key = %self.key, error = %e, "ignoring malformed persisted history");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[StoredEntry]) -> Result<(), DomainError> {
        // Held for the whole read-modify-write.
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?.unwrap_or_default();
        let value = serde_json::to_value(entries)
            .map_err(|e| DomainError::Infrastructure(format!("history serialization failed: {e}")))?;
        document.insert(self.key.clone(), value);

        let bytes = serde_json::to_vec_pretty(&Value::Object(document))
            .map_err(|e| DomainError::Infrastructure(format!("history serialization failed: {e}")))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| DomainError::Infrastructure(format!("history write task failed: {e}")))?
            .map_err(|e| {
                DomainError::Infrastructure(format!("failed to write {}: {e}", self.path.display()))
            })
    }
}
