//! Unit tests for the OCR rubber-band overlay.

use planmark::{BBox, Command, DragSelect};

use crate::helpers::*;

fn scene_with_blocks() -> planmark::PageScene {
    // Blocks project to [20,20,120,70] and [400,200,600,300] px.
    TestSceneBuilder::new()
        .with_block(BBox::new(10.0, 10.0, 60.0, 35.0))
        .with_block(BBox::new(200.0, 100.0, 300.0, 150.0))
        .build()
}

#[test]
fn test_tiny_band_is_a_click_that_clears() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    consumed(overlay.on_pointer_down(&down(500.0, 400.0)));
    let commands = overlay.on_pointer_up(&up(501.0, 401.0), &scene);

    assert_eq!(
        commands,
        vec![Command::SetSelectedBlocks {
            page_index: 0,
            indices: Vec::new(),
            additive: false,
        }]
    );
}

#[test]
fn test_tiny_additive_band_is_a_noop() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    consumed(overlay.on_pointer_down(&down_with(500.0, 400.0, shift())));
    let commands = overlay.on_pointer_up(&up(501.0, 401.0), &scene);
    assert!(commands.is_empty());
}

#[test]
fn test_band_selects_intersecting_blocks() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    consumed(overlay.on_pointer_down(&down(10.0, 10.0)));
    overlay.on_pointer_move(&moved(650.0, 350.0));
    let commands = overlay.on_pointer_up(&up(650.0, 350.0), &scene);

    assert_eq!(
        commands,
        vec![Command::SetSelectedBlocks {
            page_index: 0,
            indices: vec![0, 1],
            additive: false,
        }]
    );
}

#[test]
fn test_partial_overlap_counts_as_intersection() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    // Band clips only the second block's left edge.
    consumed(overlay.on_pointer_down(&down(350.0, 150.0)));
    let commands = overlay.on_pointer_up(&up(450.0, 350.0), &scene);

    assert_eq!(
        commands,
        vec![Command::SetSelectedBlocks {
            page_index: 0,
            indices: vec![1],
            additive: false,
        }]
    );
}

#[test]
fn test_additive_flag_captured_at_press() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    consumed(overlay.on_pointer_down(&down_with(10.0, 10.0, shift())));
    let commands = overlay.on_pointer_up(&up(650.0, 350.0), &scene);

    assert_eq!(
        commands,
        vec![Command::SetSelectedBlocks {
            page_index: 0,
            indices: vec![0, 1],
            additive: true,
        }]
    );
}

#[test]
fn test_empty_sweep_clears_unless_additive() {
    let scene = scene_with_blocks();

    let mut overlay = DragSelect::new();
    consumed(overlay.on_pointer_down(&down(700.0, 400.0)));
    let commands = overlay.on_pointer_up(&up(900.0, 450.0), &scene);
    assert_eq!(
        commands,
        vec![Command::SetSelectedBlocks {
            page_index: 0,
            indices: Vec::new(),
            additive: false,
        }]
    );

    let mut overlay = DragSelect::new();
    consumed(overlay.on_pointer_down(&down_with(700.0, 400.0, shift())));
    let commands = overlay.on_pointer_up(&up(900.0, 450.0), &scene);
    assert!(commands.is_empty());
}

#[test]
fn test_band_box_is_normalized_while_dragging() {
    let mut overlay = DragSelect::new();
    consumed(overlay.on_pointer_down(&down(100.0, 100.0)));
    overlay.on_pointer_move(&moved(50.0, 60.0));

    assert!(overlay.is_active());
    assert_eq!(
        overlay.band_box(),
        Some(BBox::new(50.0, 60.0, 100.0, 100.0))
    );
}

#[test]
fn test_cancel_discards_the_band() {
    let scene = scene_with_blocks();
    let mut overlay = DragSelect::new();

    consumed(overlay.on_pointer_down(&down(10.0, 10.0)));
    overlay.cancel();
    assert!(!overlay.is_active());
    assert!(overlay.on_pointer_up(&up(650.0, 350.0), &scene).is_empty());
}
