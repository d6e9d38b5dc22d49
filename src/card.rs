//! Card model: printed cards, their wire format, and the owning store.
//!
//! This module defines the core data types that describe what is on the table
//! (`Card`, `Variant`, `Position`) and the runtime store that owns all live
//! cards (`CardStore`). Data flows into this layer from durable storage at
//! startup (JSON deserialization) and from the engine (mutations). The host
//! renders from `CardStore` via `all` (insertion order) or `stacked`
//! (back-to-front draw order).
//!
//! Every mutation writes the full collection through to the injected
//! [`CardStorage`] backend; storage failures are logged and absorbed so the
//! table keeps working in memory.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{BASE_Z, ROTATION_JITTER_DEG};
use crate::storage::CardStorage;

/// Unique identifier for a printed card.
pub type CardId = Uuid;

/// A point in table space (CSS pixels from the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The paper style a card is printed on. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain off-white stock (default).
    #[default]
    Standard,
    /// Yellowed, antique-looking stock.
    Aged,
    /// Dark blue stock with light ink.
    Blueprint,
    /// Soft pink stock.
    Pink,
}

/// A printed card as stored in the collection and on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, assigned at print time.
    pub id: CardId,
    /// The message content, stored exactly as submitted.
    pub text: String,
    /// Top-left corner of the card in table space.
    pub position: Position,
    /// Decorative tilt in degrees, fixed at print time.
    pub rotation: f64,
    /// Stacking order; higher values render in front of lower ones.
    #[serde(rename = "zIndex")]
    pub z_index: i64,
    /// Paper style, fixed at print time.
    pub variant: Variant,
    /// Print date, e.g. `"Jan 5, 24"`.
    pub timestamp: String,
    /// Print time of day, e.g. `"14:30"`.
    pub time: String,
}

/// Format a print moment into the card's date and time-of-day strings.
pub(crate) fn format_stamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    let timestamp = moment.format("%b %-d, %y").to_string();
    let time = moment.format("%H:%M").to_string();
    (timestamp, time)
}

/// Error returned by [`CardStore::insert`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// The submitted text is empty after trimming whitespace.
    #[error("card text is empty after trimming")]
    EmptyText,
}

/// The owning store of all live cards.
///
/// Cards are kept in insertion order; stacking is expressed purely through
/// `z_index`, driven by a counter that only ever increases, so no two cards
/// share a stack position after any operation.
pub struct CardStore {
    cards: Vec<Card>,
    max_z: i64,
    storage: Box<dyn CardStorage>,
}

impl CardStore {
    /// Open a store backed by `storage`, hydrating any saved collection.
    ///
    /// An unreadable or malformed saved entry degrades to an empty table
    /// rather than an error. The stack counter resumes above the highest
    /// saved `z_index` so new prints always land in front.
    #[must_use]
    pub fn open(storage: Box<dyn CardStorage>) -> Self {
        let cards = match storage.load() {
            Ok(cards) => cards,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load saved cards, starting empty");
                Vec::new()
            }
        };
        let max_z = cards.iter().map(|c| c.z_index).max().unwrap_or(BASE_Z).max(BASE_Z);
        Self { cards, max_z, storage }
    }

    /// Print a new card at `spawn` and append it to the collection.
    ///
    /// The card gets a fresh id, a small random tilt, the next stack
    /// position, and the current local date/time stamps.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::EmptyText`] when `text` trims to nothing; the
    /// collection is left untouched in that case.
    pub fn insert(&mut self, text: &str, variant: Variant, spawn: Position) -> Result<Card, InsertError> {
        if text.trim().is_empty() {
            return Err(InsertError::EmptyText);
        }

        self.max_z += 1;
        let (timestamp, time) = format_stamp(&Local::now());
        let card = Card {
            id: Uuid::new_v4(),
            text: text.to_string(),
            position: spawn,
            rotation: rand::rng().random_range(-ROTATION_JITTER_DEG..=ROTATION_JITTER_DEG),
            z_index: self.max_z,
            variant,
            timestamp,
            time,
        };
        self.cards.push(card.clone());
        self.persist();
        Ok(card)
    }

    /// Remove a card by id, returning it if it was present. Removing an
    /// unknown id is a no-op.
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == *id)?;
        let card = self.cards.remove(index);
        self.persist();
        Some(card)
    }

    /// Raise a card to the front of the stack, returning its new stack
    /// position. Unknown ids are ignored.
    pub fn bring_to_front(&mut self, id: &CardId) -> Option<i64> {
        let card = self.cards.iter_mut().find(|c| c.id == *id)?;
        self.max_z += 1;
        card.z_index = self.max_z;
        let z = self.max_z;
        self.persist();
        Some(z)
    }

    /// Move a card to `position`. Returns `false` when the id is unknown —
    /// the card may have been discarded mid-drag, which is not an error.
    pub fn update_position(&mut self, id: &CardId, position: Position) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.id == *id) else {
            return false;
        };
        card.position = position;
        self.persist();
        true
    }

    /// All live cards in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    /// All live cards sorted back-to-front for painting.
    #[must_use]
    pub fn stacked(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().collect();
        cards.sort_by_key(|c| c.z_index);
        cards
    }

    /// Return a reference to a card by id.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == *id)
    }

    /// The current top-of-stack position.
    #[must_use]
    pub fn front_z(&self) -> i64 {
        self.max_z
    }

    /// Number of cards currently on the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the table holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Write the full collection through to storage. Failures are logged and
    /// absorbed; the in-memory collection stays authoritative.
    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.cards) {
            tracing::error!(error = %e, count = self.cards.len(), "card persist failed");
        }
    }
}
