#![allow(clippy::clone_on_copy)]

use uuid::Uuid;

use super::*;

// =============================================================
// DragState
// =============================================================

#[test]
fn default_is_idle() {
    assert_eq!(DragState::default(), DragState::Idle);
}

#[test]
fn idle_is_not_dragging() {
    assert!(!DragState::Idle.is_dragging());
    assert_eq!(DragState::Idle.dragged_card(), None);
}

#[test]
fn dragging_reports_card() {
    let id = Uuid::new_v4();
    let state = DragState::Dragging { id, offset: Position::new(10.0, 15.0) };
    assert!(state.is_dragging());
    assert_eq!(state.dragged_card(), Some(id));
}

#[test]
fn dragging_carries_offset() {
    let id = Uuid::new_v4();
    let state = DragState::Dragging { id, offset: Position::new(-4.0, 9.5) };
    match state {
        DragState::Dragging { offset, .. } => {
            assert_eq!(offset, Position::new(-4.0, 9.5));
        }
        DragState::Idle => panic!("expected Dragging"),
    }
}

#[test]
fn state_clone_and_copy() {
    let id = Uuid::new_v4();
    let a = DragState::Dragging { id, offset: Position::new(1.0, 2.0) };
    let b = a;
    let c = a.clone();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn state_debug_format() {
    let s = format!("{:?}", DragState::Idle);
    assert_eq!(s, "Idle");
}
