//! End-to-end pointer gestures through the interaction engine.
//!
//! Every test drives the engine with raw pointer events against a projected
//! scene and asserts on the emitted commands. The default test page maps
//! point space to raster space with a factor of exactly 2 on both axes.

use planmark::{BBox, Command, EntityKind, InteractionEngine, PanelTab, RelType};

use crate::helpers::*;

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draw_gesture_finalizes_in_point_space() {
    let scene = TestSceneBuilder::new().build();
    let snapshot = creating_snapshot(EntityKind::Drawing);
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(100.0, 100.0), &scene, &snapshot));
    assert!(commands.is_empty());
    assert!(engine.state().is_drawing());

    engine.on_pointer_move(&moved(300.0, 250.0), &scene, &snapshot);
    assert_eq!(engine.draft_box(), Some(BBox::new(100.0, 100.0, 300.0, 250.0)));

    let commands = engine.on_pointer_up(&up(300.0, 250.0), &scene, &snapshot);
    assert_eq!(
        commands,
        vec![
            Command::FinalizeEntityCreation {
                sheet_number: 1,
                kind: EntityKind::Drawing,
                bbox: BBox::new(50.0, 50.0, 150.0, 125.0),
            },
            Command::SetRightPanelTab {
                tab: PanelTab::Entities,
            },
        ]
    );
    assert!(engine.state().is_idle());
}

#[test]
fn test_draft_below_minimum_size_is_discarded() {
    let scene = TestSceneBuilder::new().build();
    let snapshot = creating_snapshot(EntityKind::Note);
    let mut engine = InteractionEngine::new();

    // Wide enough but only 3 units tall: still rejected.
    consumed(engine.on_pointer_down(&down(100.0, 100.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(260.0, 103.0), &scene, &snapshot);
    let commands = engine.on_pointer_up(&up(260.0, 103.0), &scene, &snapshot);

    assert!(commands.is_empty());
    assert!(engine.state().is_idle());
}

#[test]
fn test_escape_cancels_drawing() {
    let scene = TestSceneBuilder::new().build();
    let snapshot = creating_snapshot(EntityKind::Scope);
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(100.0, 100.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(400.0, 400.0), &scene, &snapshot);

    assert!(engine.handle_escape(&snapshot).is_empty());
    assert!(engine.state().is_idle());
    assert_eq!(engine.draft_box(), None);

    // The dangling release after a cancel is inert.
    let commands = engine.on_pointer_up(&up(400.0, 400.0), &scene, &snapshot);
    assert!(commands.is_empty());
}

#[test]
fn test_draw_with_tool_cleared_midway_is_dropped() {
    let scene = TestSceneBuilder::new().build();
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(100.0, 100.0), &scene, &creating_snapshot(EntityKind::Note)));
    engine.on_pointer_move(&moved(300.0, 300.0), &scene, &creating_snapshot(EntityKind::Note));

    // The shell cleared the tool before release.
    let commands = engine.on_pointer_up(&up(300.0, 300.0), &scene, &idle_snapshot());
    assert!(commands.is_empty());
    assert!(engine.state().is_idle());
}

#[test]
fn test_second_pointer_down_is_ignored_mid_gesture() {
    let scene = TestSceneBuilder::new().build();
    let snapshot = creating_snapshot(EntityKind::Drawing);
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(100.0, 100.0), &scene, &snapshot));
    let commands = consumed(engine.on_pointer_down(&down(500.0, 500.0), &scene, &snapshot));
    assert!(commands.is_empty());

    // The original gesture continues from its own start point.
    engine.on_pointer_move(&moved(200.0, 200.0), &scene, &snapshot);
    let commands = engine.on_pointer_up(&up(200.0, 200.0), &scene, &snapshot);
    assert_eq!(
        finalized_bbox(&commands),
        Some(BBox::new(50.0, 50.0, 100.0, 100.0))
    );
}

#[test]
fn test_draw_on_rotated_page_converts_through_rotation() {
    // Square page rendered rotated a quarter turn.
    let meta = planmark::RenderMeta::new(
        500.0,
        500.0,
        1000.0,
        1000.0,
        planmark::Rotation::R90,
    )
    .unwrap();
    let scene = TestSceneBuilder::new().with_meta(meta).build();
    let snapshot = creating_snapshot(EntityKind::Drawing);
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(120.0, 80.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(420.0, 360.0), &scene, &snapshot);
    let commands = engine.on_pointer_up(&up(420.0, 360.0), &scene, &snapshot);

    assert_eq!(
        finalized_bbox(&commands),
        Some(BBox::new(40.0, 290.0, 180.0, 440.0))
    );
}

#[test]
fn test_entity_hit_beats_generic_draw_tool() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(
        &down(250.0, 200.0),
        &scene,
        &creating_snapshot(EntityKind::Note),
    ));
    assert!(engine.state().is_editing());
    assert!(commands.contains(&Command::SetSelectedEntity {
        entity_id: Some(note_id),
    }));
}

// ============================================================================
// Stamping
// ============================================================================

fn stamp_scene() -> planmark::PageScene {
    // Drawing projects to [100,100,900,400] px.
    TestSceneBuilder::new()
        .with_entity(drawing(BBox::new(50.0, 50.0, 450.0, 200.0)))
        .build()
}

#[test]
fn test_stamp_inside_drawing_finalizes() {
    let scene = stamp_scene();
    // Definition is 30x20 pt -> 60x40 px on this page.
    let snapshot = stamping_snapshot(Some(BBox::new(0.0, 0.0, 30.0, 20.0)));
    let mut engine = InteractionEngine::new();

    let mut all = consumed(engine.on_pointer_down(&down(500.0, 300.0), &scene, &snapshot));
    assert!(engine.state().is_stamping());
    assert_eq!(engine.draft_box(), Some(BBox::new(470.0, 280.0, 530.0, 320.0)));

    all.extend(engine.on_pointer_up(&up(500.0, 300.0), &scene, &snapshot));
    assert_eq!(count_failures(&all), 0);
    assert_eq!(count_finalizes(&all), 1);
    assert_eq!(
        finalized_bbox(&all),
        Some(BBox::new(235.0, 140.0, 265.0, 160.0))
    );
}

#[test]
fn test_stamp_near_edge_is_clamped_into_container() {
    let scene = stamp_scene();
    let snapshot = stamping_snapshot(Some(BBox::new(0.0, 0.0, 30.0, 20.0)));
    let mut engine = InteractionEngine::new();

    let mut all = consumed(engine.on_pointer_down(&down(110.0, 110.0), &scene, &snapshot));
    assert_eq!(engine.draft_box(), Some(BBox::new(100.0, 100.0, 160.0, 140.0)));

    all.extend(engine.on_pointer_up(&up(110.0, 110.0), &scene, &snapshot));
    assert_eq!(count_finalizes(&all), 1);

    // The committed box sits fully inside the drawing's point-space box.
    let bbox = finalized_bbox(&all).unwrap();
    let container = BBox::new(50.0, 50.0, 450.0, 200.0);
    assert!(bbox.x1 >= container.x1 && bbox.x2 <= container.x2);
    assert!(bbox.y1 >= container.y1 && bbox.y2 <= container.y2);
}

#[test]
fn test_oversized_stamp_fails_exactly_once() {
    let scene = stamp_scene();
    // 500x200 pt -> 1000x400 px, larger than the 800x300 px drawing.
    let snapshot = stamping_snapshot(Some(BBox::new(0.0, 0.0, 500.0, 200.0)));
    let mut engine = InteractionEngine::new();

    let mut all = consumed(engine.on_pointer_down(&down(500.0, 300.0), &scene, &snapshot));
    assert_eq!(engine.draft_box(), None);

    all.extend(engine.on_pointer_up(&up(500.0, 300.0), &scene, &snapshot));
    assert_eq!(count_failures(&all), 1);
    assert_eq!(count_finalizes(&all), 0);
    assert!(engine.state().is_idle());
}

#[test]
fn test_stamp_released_outside_any_drawing_fails_once() {
    let scene = stamp_scene();
    let snapshot = stamping_snapshot(None);
    let mut engine = InteractionEngine::new();

    let mut all = consumed(engine.on_pointer_down(&down(1500.0, 800.0), &scene, &snapshot));
    all.extend(engine.on_pointer_up(&up(1500.0, 800.0), &scene, &snapshot));

    assert_eq!(count_failures(&all), 1);
    assert_eq!(count_finalizes(&all), 0);
}

#[test]
fn test_stamp_tool_beats_entity_hit() {
    let d = drawing(BBox::new(50.0, 50.0, 450.0, 200.0));
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let scene = TestSceneBuilder::new().with_entity(d).with_entity(n).build();
    let mut engine = InteractionEngine::new();

    // Press over the note: with a stamp tool armed the press stamps instead
    // of starting a move.
    consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &stamping_snapshot(None)));
    assert!(engine.state().is_stamping());
    assert!(engine.draft_box().is_some());
}

#[test]
fn test_stamp_hover_highlights_target_drawing() {
    let d = drawing(BBox::new(50.0, 50.0, 450.0, 200.0));
    let drawing_id = d.id;
    let scene = TestSceneBuilder::new().with_entity(d).build();
    let snapshot = stamping_snapshot(None);
    let mut engine = InteractionEngine::new();

    engine.on_pointer_move(&moved(500.0, 300.0), &scene, &snapshot);
    assert_eq!(engine.hover_drawing(), Some(drawing_id));

    engine.on_pointer_move(&moved(1900.0, 950.0), &scene, &snapshot);
    assert_eq!(engine.hover_drawing(), None);
}

// ============================================================================
// Moving and resizing
// ============================================================================

#[test]
fn test_move_gesture_commits_live_override() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let other = note(BBox::new(400.0, 75.0, 450.0, 150.0));
    let other_id = other.id;
    let scene = TestSceneBuilder::new().with_entity(n).with_entity(other).build();
    let snapshot = idle_snapshot();
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &snapshot));
    assert_eq!(
        commands,
        vec![
            Command::SetSelectedEntity {
                entity_id: Some(note_id),
            },
            Command::SetRightPanelTab {
                tab: PanelTab::Entities,
            },
        ]
    );

    engine.on_pointer_move(&moved(280.0, 240.0), &scene, &snapshot);
    assert_eq!(
        engine.override_for(note_id),
        Some(BBox::new(230.0, 190.0, 430.0, 340.0))
    );
    // Only the dragged entity carries an override.
    assert_eq!(engine.override_for(other_id), None);

    // Deltas always measure from the gesture start, not the last move.
    engine.on_pointer_move(&moved(270.0, 230.0), &scene, &snapshot);
    assert_eq!(
        engine.override_for(note_id),
        Some(BBox::new(220.0, 180.0, 420.0, 330.0))
    );

    let commands = engine.on_pointer_up(&up(270.0, 230.0), &scene, &snapshot);
    assert_eq!(
        commands,
        vec![Command::UpdateEntityBbox {
            entity_id: note_id,
            bbox: BBox::new(110.0, 90.0, 210.0, 165.0),
        }]
    );

    // Optimistic override survives until the store confirms.
    assert!(engine.override_for(note_id).is_some());
    engine.reconcile_override(note_id);
    assert_eq!(engine.override_for(note_id), None);
}

#[test]
fn test_click_without_motion_commits_nothing() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = idle_snapshot();
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &snapshot));
    let commands = engine.on_pointer_up(&up(250.0, 200.0), &scene, &snapshot);
    assert!(commands.is_empty());
    assert!(engine.overrides().is_empty());
}

#[test]
fn test_resize_from_corner_handle() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = with_selected(idle_snapshot(), note_id);
    let mut engine = InteractionEngine::new();

    // Press exactly on the bottom-right anchor of [200,150,400,300] px.
    consumed(engine.on_pointer_down(&down(400.0, 300.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(430.0, 340.0), &scene, &snapshot);
    assert_eq!(
        engine.override_for(note_id),
        Some(BBox::new(200.0, 150.0, 430.0, 340.0))
    );

    let commands = engine.on_pointer_up(&up(430.0, 340.0), &scene, &snapshot);
    assert_eq!(
        commands,
        vec![Command::UpdateEntityBbox {
            entity_id: note_id,
            bbox: BBox::new(100.0, 75.0, 215.0, 170.0),
        }]
    );
}

#[test]
fn test_resize_side_handle_moves_one_edge_and_clamps() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = with_selected(idle_snapshot(), note_id);
    let mut engine = InteractionEngine::new();

    // Middle-left anchor of [200,150,400,300] px.
    consumed(engine.on_pointer_down(&down(200.0, 225.0), &scene, &snapshot));

    engine.on_pointer_move(&moved(190.0, 500.0), &scene, &snapshot);
    assert_eq!(
        engine.override_for(note_id),
        Some(BBox::new(190.0, 150.0, 400.0, 300.0))
    );

    // Dragging far past the right edge pins x1 one unit short of x2.
    engine.on_pointer_move(&moved(1000.0, 225.0), &scene, &snapshot);
    let bbox = engine.override_for(note_id).unwrap();
    assert_eq!(bbox, BBox::new(399.0, 150.0, 400.0, 300.0));
    assert!(bbox.width() >= 1.0);
}

#[test]
fn test_handles_require_selection() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let mut engine = InteractionEngine::new();

    // Same press point as the corner-resize test, but nothing is selected:
    // the gesture is a move and translates the whole box.
    consumed(engine.on_pointer_down(&down(400.0, 300.0), &scene, &idle_snapshot()));
    engine.on_pointer_move(&moved(410.0, 310.0), &scene, &idle_snapshot());
    assert_eq!(
        engine.override_for(note_id),
        Some(BBox::new(210.0, 160.0, 410.0, 310.0))
    );
}

#[test]
fn test_hover_cursor_over_selected_entity() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = with_selected(idle_snapshot(), note_id);
    let mut engine = InteractionEngine::new();

    use planmark::CursorStyle;

    engine.on_pointer_move(&moved(400.0, 300.0), &scene, &snapshot);
    assert_eq!(engine.hover_cursor(), CursorStyle::NwseResize);

    // The center anchor is not a handle; the body reads as movable.
    engine.on_pointer_move(&moved(300.0, 225.0), &scene, &snapshot);
    assert_eq!(engine.hover_cursor(), CursorStyle::Move);

    engine.on_pointer_move(&moved(1500.0, 450.0), &scene, &snapshot);
    assert_eq!(engine.hover_cursor(), CursorStyle::Default);
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_linking_toggles_allowed_target() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = linking_snapshot(RelType::JustifiedBy);
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &snapshot));
    assert_eq!(
        commands,
        vec![Command::ToggleLinkTarget { entity_id: note_id }]
    );
    assert!(engine.state().is_idle());
}

#[test]
fn test_linking_ignores_disallowed_kind() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = linking_snapshot(RelType::Depicts);
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &snapshot));
    assert!(commands.is_empty());
}

#[test]
fn test_linking_suppresses_move_and_resize() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let note_id = n.id;
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let snapshot = with_selected(linking_snapshot(RelType::JustifiedBy), note_id);
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(250.0, 200.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(350.0, 300.0), &scene, &snapshot);
    let commands = engine.on_pointer_up(&up(350.0, 300.0), &scene, &snapshot);

    assert!(engine.overrides().is_empty());
    assert!(
        !commands
            .iter()
            .any(|c| matches!(c, Command::UpdateEntityBbox { .. }))
    );
}

#[test]
fn test_linking_beats_stamp_tool() {
    let d = drawing(BBox::new(50.0, 50.0, 450.0, 200.0));
    let drawing_id = d.id;
    let scene = TestSceneBuilder::new().with_entity(d).build();
    let mut snapshot = linking_snapshot(RelType::Depicts);
    snapshot.creating = stamping_snapshot(None).creating;
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(500.0, 300.0), &scene, &snapshot));
    assert_eq!(
        commands,
        vec![Command::ToggleLinkTarget {
            entity_id: drawing_id,
        }]
    );
    assert!(engine.state().is_idle());
}

#[test]
fn test_escape_requests_linking_cancel() {
    let snapshot = linking_snapshot(RelType::LocatedIn);
    let mut engine = InteractionEngine::new();
    assert_eq!(engine.handle_escape(&snapshot), vec![Command::CancelLinking]);
}

// ============================================================================
// Armed OCR clicks
// ============================================================================

fn ocr_scene() -> planmark::PageScene {
    // Block projects to [400,200,600,300] px.
    TestSceneBuilder::new()
        .with_block(BBox::new(200.0, 100.0, 300.0, 150.0))
        .build()
}

#[test]
fn test_block_click_confirms_within_slop() {
    let scene = ocr_scene();
    let snapshot = ocr_snapshot();
    let mut engine = InteractionEngine::new();

    let commands = consumed(engine.on_pointer_down(&down(500.0, 250.0), &scene, &snapshot));
    assert!(commands.is_empty());
    assert!(engine.armed_click().is_some());

    let commands = engine.on_pointer_up(&up(502.0, 252.0), &scene, &snapshot);
    assert_eq!(
        commands,
        vec![Command::ToggleSelectBlock {
            page_index: 0,
            block_index: 0,
            additive: false,
        }]
    );
    assert!(engine.armed_click().is_none());
}

#[test]
fn test_block_click_additive_modifier() {
    let scene = ocr_scene();
    let snapshot = ocr_snapshot();
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down_with(500.0, 250.0, shift()), &scene, &snapshot));
    let commands = engine.on_pointer_up(&up(500.0, 250.0), &scene, &snapshot);
    assert_eq!(
        commands,
        vec![Command::ToggleSelectBlock {
            page_index: 0,
            block_index: 0,
            additive: true,
        }]
    );
}

#[test]
fn test_block_click_cancelled_by_motion() {
    let scene = ocr_scene();
    let snapshot = ocr_snapshot();
    let mut engine = InteractionEngine::new();

    consumed(engine.on_pointer_down(&down(500.0, 250.0), &scene, &snapshot));
    engine.on_pointer_move(&moved(505.0, 250.0), &scene, &snapshot);
    assert!(engine.armed_click().is_none());

    let commands = engine.on_pointer_up(&up(505.0, 250.0), &scene, &snapshot);
    assert!(commands.is_empty());
}

#[test]
fn test_block_click_checked_again_at_release() {
    let scene = ocr_scene();
    let snapshot = ocr_snapshot();
    let mut engine = InteractionEngine::new();

    // No move event arrives, but the release itself drifted too far.
    consumed(engine.on_pointer_down(&down(500.0, 250.0), &scene, &snapshot));
    let commands = engine.on_pointer_up(&up(506.0, 250.0), &scene, &snapshot);
    assert!(commands.is_empty());
}

#[test]
fn test_block_press_declined_when_overlay_hidden() {
    let scene = ocr_scene();
    let mut engine = InteractionEngine::new();

    let dispatch = engine.on_pointer_down(&down(500.0, 250.0), &scene, &idle_snapshot());
    assert!(dispatch.is_declined());
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn test_empty_press_is_declined() {
    let n = note(BBox::new(100.0, 75.0, 200.0, 150.0));
    let scene = TestSceneBuilder::new().with_entity(n).build();
    let mut engine = InteractionEngine::new();

    let dispatch = engine.on_pointer_down(&down(1800.0, 900.0), &scene, &idle_snapshot());
    assert!(dispatch.is_declined());
    assert!(engine.state().is_idle());
}
