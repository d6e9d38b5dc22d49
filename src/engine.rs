//! Top-level engine: the host-facing facade over store, drag machine, and
//! print service.
//!
//! The host wires UI events to the entry points here and processes the
//! returned [`Action`]s (re-render, animate a fresh print, drop a deleted
//! card). All mutations happen synchronously inside these calls; the only
//! suspension point in the system — waiting on the text-enhancement
//! delegate — runs between [`Engine::begin_enhance`] and
//! [`Engine::complete_enhance`] without borrowing the engine, so dragging
//! stays responsive while a request is in flight.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::card::{Card, CardId, CardStore, Position, Variant};
use crate::input::DragState;
use crate::printer::PrintService;
use crate::storage::{CardStorage, MemoryStorage};

/// Actions returned from entry points for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new card was printed; hosts typically animate it in.
    CardCreated(Card),
    /// A card was discarded.
    CardDeleted { id: CardId },
    /// Visible state changed; repaint the table.
    RenderNeeded,
}

/// The card-table engine.
pub struct Engine {
    pub store: CardStore,
    pub input: DragState,
    pub printer: PrintService,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Engine {
    /// Open an engine whose collection persists to `storage`.
    #[must_use]
    pub fn open(storage: Box<dyn CardStorage>) -> Self {
        Self {
            store: CardStore::open(storage),
            input: DragState::default(),
            printer: PrintService::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Open an engine backed by throwaway in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStorage::new()))
    }

    /// Update viewport dimensions; future prints spawn relative to these.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // --- Printing ---

    /// Print `text` onto a new card at the spawn point. Empty or
    /// whitespace-only text produces no card and no actions.
    pub fn print(&mut self, text: &str, variant: Variant) -> Vec<Action> {
        let printed = self.printer.print(
            &mut self.store,
            text,
            variant,
            self.viewport_width,
            self.viewport_height,
        );
        match printed {
            Some(card) => vec![Action::CardCreated(card), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Claim the enhancement slot before awaiting the delegate. Returns
    /// `false` while a previous request is still outstanding; the host
    /// should disable the trigger control in that case.
    pub fn begin_enhance(&mut self) -> bool {
        self.printer.begin_enhance()
    }

    /// Finish an enhanced print with the delegate's result: releases the
    /// slot and prints `text`. The delegate guarantees non-empty text, so
    /// this normally creates a card.
    pub fn complete_enhance(&mut self, text: &str, variant: Variant) -> Vec<Action> {
        self.printer.finish_enhance();
        self.print(text, variant)
    }

    /// Whether an enhancement request is currently outstanding.
    #[must_use]
    pub fn enhance_pending(&self) -> bool {
        self.printer.enhance_pending()
    }

    // --- Deletion ---

    /// Discard a card. Unknown ids are ignored (the card may already be
    /// gone) and produce no actions.
    pub fn remove_card(&mut self, id: &CardId) -> Vec<Action> {
        match self.store.remove(id) {
            Some(card) => vec![Action::CardDeleted { id: card.id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Pointer events ---

    /// Pointer pressed over a card: raise it to the front and start a drag
    /// session carrying the pick-up offset. Unknown ids leave the machine
    /// idle.
    pub fn on_pointer_down(&mut self, id: CardId, pointer: Position) -> Vec<Action> {
        let Some(card) = self.store.get(&id) else {
            return Vec::new();
        };
        let offset = Position::new(pointer.x - card.position.x, pointer.y - card.position.y);
        self.store.bring_to_front(&id);
        self.input = DragState::Dragging { id, offset };
        vec![Action::RenderNeeded]
    }

    /// Pointer moved. Outside a drag session this is ignored entirely; inside
    /// one, every move repositions the card so it tracks the pointer exactly.
    pub fn on_pointer_move(&mut self, pointer: Position) -> Vec<Action> {
        let DragState::Dragging { id, offset } = self.input else {
            return Vec::new();
        };
        let next = Position::new(pointer.x - offset.x, pointer.y - offset.y);
        if self.store.update_position(&id, next) {
            vec![Action::RenderNeeded]
        } else {
            // Card was discarded mid-drag; the session ends on release.
            Vec::new()
        }
    }

    /// Pointer released anywhere: the drag session ends unconditionally.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.input = DragState::Idle;
        Vec::new()
    }

    /// Pointer gesture cancelled (e.g. window lost focus mid-drag).
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Queries ---

    /// All live cards in insertion order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.store.all()
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.store.get(id)
    }

    /// Whether a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }
}
