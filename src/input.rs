//! Input model: the drag-session state machine.
//!
//! A drag session begins on pointer-down over a card and carries the
//! pointer-to-card-origin offset captured at pick-up, so position updates
//! keep the card glued to the pointer for the whole gesture. The engine
//! consults the session on every pointer-move and destroys it on pointer-up
//! or pointer-cancel. At most one session exists at a time.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::card::{CardId, Position};

/// State of the drag machine between pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; pointer moves are ignored.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging {
        /// Id of the card being dragged. The card may be discarded mid-drag;
        /// the session survives and ends normally on release.
        id: CardId,
        /// Pointer position minus card position at the instant of pick-up.
        offset: Position,
    },
}

impl DragState {
    /// Whether a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The id of the card being dragged, if any.
    #[must_use]
    pub fn dragged_card(&self) -> Option<CardId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } => Some(*id),
        }
    }
}
