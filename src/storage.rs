//! Durable storage backends for the card collection.
//!
//! The collection persists as a single JSON entry — one array of card
//! records — rather than per-card files. [`FileStorage`] keeps that entry on
//! disk for real sessions; [`MemoryStorage`] keeps the same serialized text
//! in memory so tests exercise the identical serde path.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::card::Card;

/// Errors produced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The saved entry is not a valid card collection.
    #[error("saved cards failed to parse: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A durable home for the full card collection.
///
/// `save` always receives the complete collection; backends never merge.
pub trait CardStorage {
    /// Load the saved collection. A backend with no saved entry returns an
    /// empty collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the entry exists but cannot be read
    /// or parsed.
    fn load(&self) -> Result<Vec<Card>, StorageError>;

    /// Replace the saved entry with `cards`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the entry cannot be serialized or
    /// written.
    fn save(&mut self, cards: &[Card]) -> Result<(), StorageError>;
}

// =============================================================================
// FILE STORAGE
// =============================================================================

/// File-backed storage: the whole collection lives in one JSON document.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the JSON document at `path`. The file (and
    /// its parent directories) are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CardStorage for FileStorage {
    fn load(&self) -> Result<Vec<Card>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&mut self, cards: &[Card]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string(cards)?;
        // Write a sibling temp file, then rename over the entry, so a crash
        // mid-write never leaves a truncated collection behind.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-memory storage holding the serialized entry text.
///
/// Clones share the same entry, so a test can keep one handle while the
/// store owns another and observe every write-through.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entry: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self) -> MutexGuard<'_, Option<String>> {
        match self.entry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// The raw serialized entry, if anything has been saved yet.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.entry().clone()
    }
}

impl CardStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Card>, StorageError> {
        match self.entry().as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, cards: &[Card]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cards)?;
        *self.entry() = Some(raw);
        Ok(())
    }
}
