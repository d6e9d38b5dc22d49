//! Spawn/print service: where new cards land and how enhanced prints are
//! gated.
//!
//! Every print launches from the same deterministic spot — horizontally
//! centered, anchored near the bottom of the viewport — regardless of where
//! existing cards sit. The service also owns the single-flight guard for
//! enhanced ("surprise me") prints: while one enhancement request is
//! outstanding, further requests are refused, but the rest of the engine
//! stays fully interactive.

#[cfg(test)]
#[path = "printer_test.rs"]
mod printer_test;

use crate::card::{Card, CardStore, InsertError, Position, Variant};
use crate::consts::{CARD_HALF_WIDTH_PX, SPAWN_BOTTOM_OFFSET_PX};
use crate::engine::{Action, Engine};
use crate::enhance::{Enhancer, enhance};

/// Policy component translating submitted text into store insertions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintService {
    enhance_pending: bool,
}

impl PrintService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed launch position for a viewport of the given size: card
    /// centered horizontally, anchored near the bottom edge.
    #[must_use]
    pub fn spawn_point(viewport_width: f64, viewport_height: f64) -> Position {
        Position::new(
            viewport_width / 2.0 - CARD_HALF_WIDTH_PX,
            viewport_height - SPAWN_BOTTOM_OFFSET_PX,
        )
    }

    /// Print `text` onto a new card at the spawn point.
    ///
    /// Empty or whitespace-only text is rejected before the store is
    /// touched; `None` means nothing was printed.
    pub fn print(
        &self,
        store: &mut CardStore,
        text: &str,
        variant: Variant,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Option<Card> {
        if text.trim().is_empty() {
            return None;
        }
        match store.insert(text, variant, Self::spawn_point(viewport_width, viewport_height)) {
            Ok(card) => Some(card),
            Err(InsertError::EmptyText) => None,
        }
    }

    /// Claim the single enhancement slot. Returns `false` while a previous
    /// request is still outstanding.
    pub fn begin_enhance(&mut self) -> bool {
        if self.enhance_pending {
            return false;
        }
        self.enhance_pending = true;
        true
    }

    /// Release the enhancement slot.
    pub fn finish_enhance(&mut self) {
        self.enhance_pending = false;
    }

    /// Whether an enhancement request is currently outstanding.
    #[must_use]
    pub fn enhance_pending(&self) -> bool {
        self.enhance_pending
    }
}

/// Run the full enhanced-print flow: claim the slot, wait for the delegate,
/// print whatever comes back.
///
/// No card is inserted until the delegate resolves; the delegate absorbs its
/// own failures, so the printed text is always non-empty. Returns no actions
/// when another enhanced print is already in flight.
pub async fn magic_print(
    engine: &mut Engine,
    enhancer: &dyn Enhancer,
    input: &str,
    variant: Variant,
) -> Vec<Action> {
    if !engine.begin_enhance() {
        return Vec::new();
    }
    let text = enhance(enhancer, input).await;
    engine.complete_enhance(&text, variant)
}
