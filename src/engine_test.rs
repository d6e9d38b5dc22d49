#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::consts::BASE_Z;
use crate::input::DragState;

// =============================================================
// Helpers
// =============================================================

fn engine() -> Engine {
    let mut engine = Engine::in_memory();
    engine.set_viewport(1280.0, 800.0);
    engine
}

fn pt(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn print_one(engine: &mut Engine, text: &str) -> CardId {
    let actions = engine.print(text, Variant::Standard);
    created_card(&actions).id
}

fn created_card(actions: &[Action]) -> Card {
    for action in actions {
        if let Action::CardCreated(card) = action {
            return card.clone();
        }
    }
    panic!("expected Action::CardCreated in {actions:?}");
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_card_created(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::CardCreated(_)))
}

fn has_card_deleted(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::CardDeleted { .. }))
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn in_memory_engine_starts_empty() {
    let engine = Engine::in_memory();
    assert!(engine.cards().is_empty());
    assert!(!engine.is_dragging());
    assert!(!engine.enhance_pending());
}

#[test]
fn default_viewport_is_zero() {
    let engine = Engine::in_memory();
    assert_eq!(engine.viewport_width, 0.0);
    assert_eq!(engine.viewport_height, 0.0);
}

#[test]
fn set_viewport_stores_dimensions() {
    let mut engine = Engine::in_memory();
    engine.set_viewport(1920.0, 1080.0);
    assert_eq!(engine.viewport_width, 1920.0);
    assert_eq!(engine.viewport_height, 1080.0);
}

#[test]
fn set_viewport_overwrites_previous() {
    let mut engine = engine();
    engine.set_viewport(1024.0, 768.0);
    assert_eq!(engine.viewport_width, 1024.0);
    assert_eq!(engine.viewport_height, 768.0);
}

// =============================================================
// Print
// =============================================================

#[test]
fn print_creates_card_with_actions() {
    let mut engine = engine();
    let actions = engine.print("Hello", Variant::Standard);
    assert!(has_card_created(&actions));
    assert!(has_render_needed(&actions));
    assert_eq!(engine.cards().len(), 1);
}

#[test]
fn print_spawns_at_fixed_launch_position() {
    let mut engine = engine();
    let card = created_card(&engine.print("launch", Variant::Standard));
    // 1280 / 2 - 160 horizontally, 800 - 350 vertically.
    assert_eq!(card.position, pt(480.0, 450.0));
}

#[test]
fn print_ignores_existing_card_positions() {
    let mut engine = engine();
    let first = print_one(&mut engine, "first");
    engine.on_pointer_down(first, pt(480.0, 450.0));
    engine.on_pointer_move(pt(900.0, 100.0));
    engine.on_pointer_up();

    let second = created_card(&engine.print("second", Variant::Standard));
    assert_eq!(second.position, pt(480.0, 450.0));
}

#[test]
fn print_empty_text_is_rejected() {
    let mut engine = engine();
    let actions = engine.print("", Variant::Standard);
    assert!(actions.is_empty());
    assert!(engine.cards().is_empty());
}

#[test]
fn print_whitespace_text_is_rejected() {
    let mut engine = engine();
    let actions = engine.print("  \n ", Variant::Pink);
    assert!(actions.is_empty());
    assert!(engine.cards().is_empty());
}

#[test]
fn print_stacks_newest_in_front() {
    let mut engine = engine();
    let a = print_one(&mut engine, "under");
    let b = print_one(&mut engine, "over");
    assert!(engine.card(&b).unwrap().z_index > engine.card(&a).unwrap().z_index);
}

#[test]
fn print_two_cards_scenario() {
    let mem = crate::storage::MemoryStorage::new();
    let mut engine = Engine::open(Box::new(mem.clone()));
    engine.set_viewport(1280.0, 800.0);

    let hello = created_card(&engine.print("Hello", Variant::Standard));
    let world = created_card(&engine.print("World", Variant::Pink));

    assert_eq!(engine.cards().len(), 2);
    assert!(world.z_index > hello.z_index);
    assert!(engine.card(&hello.id).is_some());
    assert!(engine.card(&world.id).is_some());

    // The persisted entry reloads to an equal collection.
    let reloaded = Engine::open(Box::new(mem));
    assert_eq!(reloaded.cards(), engine.cards());
}

// =============================================================
// Pointer down
// =============================================================

#[test]
fn pointer_down_starts_drag_and_raises() {
    let mut engine = engine();
    let under = print_one(&mut engine, "under");
    let target = print_one(&mut engine, "target");
    engine.on_pointer_down(under, pt(480.0, 450.0));

    assert!(engine.is_dragging());
    assert_eq!(engine.input.dragged_card(), Some(under));
    assert!(engine.card(&under).unwrap().z_index > engine.card(&target).unwrap().z_index);
}

#[test]
fn pointer_down_emits_render() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    let actions = engine.on_pointer_down(id, pt(480.0, 450.0));
    assert!(has_render_needed(&actions));
}

#[test]
fn pointer_down_captures_pickup_offset() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.store.update_position(&id, pt(100.0, 100.0));

    engine.on_pointer_down(id, pt(110.0, 115.0));
    match engine.input {
        DragState::Dragging { offset, .. } => assert_eq!(offset, pt(10.0, 15.0)),
        DragState::Idle => panic!("expected a drag session"),
    }
}

#[test]
fn pointer_down_unknown_id_stays_idle() {
    let mut engine = engine();
    print_one(&mut engine, "card");
    let actions = engine.on_pointer_down(Uuid::new_v4(), pt(0.0, 0.0));
    assert!(actions.is_empty());
    assert!(!engine.is_dragging());
}

#[test]
fn pointer_down_raises_exactly_once_without_moves() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    let before = engine.card(&id).unwrap().z_index;

    engine.on_pointer_down(id, pt(480.0, 450.0));
    engine.on_pointer_up();
    assert_eq!(engine.card(&id).unwrap().z_index, before + 1);
}

// =============================================================
// Pointer move
// =============================================================

#[test]
fn move_while_idle_is_ignored() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    let before = engine.card(&id).unwrap().position;

    let actions = engine.on_pointer_move(pt(999.0, 999.0));
    assert!(actions.is_empty());
    assert_eq!(engine.card(&id).unwrap().position, before);
}

#[test]
fn drag_tracks_pointer_exactly() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.store.update_position(&id, pt(100.0, 100.0));

    engine.on_pointer_down(id, pt(110.0, 115.0));
    let actions = engine.on_pointer_move(pt(200.0, 150.0));

    assert!(has_render_needed(&actions));
    assert_eq!(engine.card(&id).unwrap().position, pt(190.0, 135.0));
}

#[test]
fn drag_fidelity_is_offset_preserving() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    let p = pt(37.0, -12.0);
    engine.store.update_position(&id, p);

    let q = pt(60.5, 4.0);
    let q2 = pt(-8.0, 310.25);
    engine.on_pointer_down(id, q);
    engine.on_pointer_move(q2);

    let moved = engine.card(&id).unwrap().position;
    assert_eq!(moved, pt(p.x + (q2.x - q.x), p.y + (q2.y - q.y)));
}

#[test]
fn every_move_produces_an_update() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.store.update_position(&id, pt(0.0, 0.0));
    engine.on_pointer_down(id, pt(0.0, 0.0));

    for step in 1..=10 {
        let target = f64::from(step) * 10.0;
        engine.on_pointer_move(pt(target, target));
        assert_eq!(engine.card(&id).unwrap().position, pt(target, target));
    }
}

#[test]
fn card_deleted_mid_drag_moves_become_noops() {
    let mut engine = engine();
    let id = print_one(&mut engine, "doomed");
    engine.on_pointer_down(id, pt(480.0, 450.0));

    let actions = engine.remove_card(&id);
    assert!(has_card_deleted(&actions));

    let move_actions = engine.on_pointer_move(pt(10.0, 10.0));
    assert!(move_actions.is_empty());
    assert!(engine.is_dragging()); // session survives until release

    engine.on_pointer_up();
    assert!(!engine.is_dragging());
}

// =============================================================
// Pointer up / cancel
// =============================================================

#[test]
fn pointer_up_clears_session() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.on_pointer_down(id, pt(480.0, 450.0));
    engine.on_pointer_up();
    assert!(!engine.is_dragging());
}

#[test]
fn pointer_up_while_idle_is_noop() {
    let mut engine = engine();
    let actions = engine.on_pointer_up();
    assert!(actions.is_empty());
    assert!(!engine.is_dragging());
}

#[test]
fn pointer_cancel_clears_session() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.on_pointer_down(id, pt(480.0, 450.0));
    engine.on_pointer_cancel();
    assert!(!engine.is_dragging());
}

#[test]
fn drag_position_survives_reload() {
    let mem = crate::storage::MemoryStorage::new();
    let mut engine = Engine::open(Box::new(mem.clone()));
    engine.set_viewport(1280.0, 800.0);

    let id = print_one(&mut engine, "dragged");
    engine.on_pointer_down(id, pt(480.0, 450.0));
    engine.on_pointer_move(pt(600.0, 200.0));
    engine.on_pointer_up();
    let final_position = engine.card(&id).unwrap().position;

    let reloaded = Engine::open(Box::new(mem));
    assert_eq!(reloaded.card(&id).unwrap().position, final_position);
}

// =============================================================
// Deletion
// =============================================================

#[test]
fn remove_card_emits_deleted_action() {
    let mut engine = engine();
    let id = print_one(&mut engine, "bye");
    let actions = engine.remove_card(&id);
    assert!(has_card_deleted(&actions));
    assert!(has_render_needed(&actions));
    assert!(engine.cards().is_empty());
}

#[test]
fn remove_card_twice_is_idempotent() {
    let mut engine = engine();
    let id = print_one(&mut engine, "bye");
    engine.remove_card(&id);
    let actions = engine.remove_card(&id);
    assert!(actions.is_empty());
}

#[test]
fn remove_unknown_card_is_noop() {
    let mut engine = engine();
    print_one(&mut engine, "stay");
    let actions = engine.remove_card(&Uuid::new_v4());
    assert!(actions.is_empty());
    assert_eq!(engine.cards().len(), 1);
}

// =============================================================
// Enhancement gating
// =============================================================

#[test]
fn begin_enhance_claims_slot() {
    let mut engine = engine();
    assert!(engine.begin_enhance());
    assert!(engine.enhance_pending());
}

#[test]
fn begin_enhance_refuses_while_pending() {
    let mut engine = engine();
    assert!(engine.begin_enhance());
    assert!(!engine.begin_enhance());
}

#[test]
fn complete_enhance_prints_and_releases_slot() {
    let mut engine = engine();
    engine.begin_enhance();
    let actions = engine.complete_enhance("enhanced text", Variant::Aged);

    assert!(has_card_created(&actions));
    assert!(!engine.enhance_pending());
    assert_eq!(engine.cards()[0].text, "enhanced text");
    assert_eq!(engine.cards()[0].variant, Variant::Aged);
}

#[test]
fn enhancement_does_not_block_dragging() {
    let mut engine = engine();
    let id = print_one(&mut engine, "card");
    engine.store.update_position(&id, pt(100.0, 100.0));

    engine.begin_enhance();
    engine.on_pointer_down(id, pt(100.0, 100.0));
    engine.on_pointer_move(pt(150.0, 160.0));
    assert_eq!(engine.card(&id).unwrap().position, pt(150.0, 160.0));

    let actions = engine.complete_enhance("late arrival", Variant::Standard);
    assert!(has_card_created(&actions));
}

// =============================================================
// Stack invariant across mixed operations
// =============================================================

#[test]
fn pickups_and_prints_keep_strict_stack_order() {
    let mut engine = engine();
    let a = print_one(&mut engine, "a");
    let b = print_one(&mut engine, "b");

    engine.on_pointer_down(a, pt(480.0, 450.0));
    engine.on_pointer_up();
    let c = print_one(&mut engine, "c");
    engine.on_pointer_down(b, pt(480.0, 450.0));
    engine.on_pointer_up();

    let z = |id: &CardId| engine.card(id).unwrap().z_index;
    assert!(z(&b) > z(&c), "last pickup should be on top");
    assert!(z(&c) > z(&a));
    assert_eq!(engine.store.front_z(), BASE_Z + 5); // 3 prints + 2 pickups
}
