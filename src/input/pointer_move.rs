//! Pointer-move handling: drag updates, hover feedback, click-arm slop.
//!
//! Moves never emit commands. Drags only touch the engine's own transient
//! state (draft boxes, the live-override map); canonical geometry stays
//! untouched until pointer up commits.

use crate::constants::{MIN_RESIZE_EDGE_GAP_PX, OCR_CLICK_SLOP_PX};
use crate::geometry::{BBox, Point};
use crate::hit_testing::{CursorStyle, Handle, HitTester};
use crate::scene::PageScene;

use super::snapshot::GestureSnapshot;
use super::state::InteractionState;
use super::{InteractionEngine, PointerMoveEvent};

impl InteractionEngine {
    pub fn on_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) {
        let pos = event.position;

        match self.state {
            InteractionState::Drawing { start, .. } => {
                self.state = InteractionState::Drawing {
                    start,
                    draft: BBox::from_points(start, pos),
                };
            }
            InteractionState::Stamping { .. } => {
                // The draft is fixed at press; only the target highlight
                // tracks the pointer.
                self.hover_drawing = HitTester::new(scene).drawing_at(pos).map(|d| d.id);
            }
            InteractionState::Moving {
                entity_id,
                start,
                start_box,
            } => {
                let delta = (pos.x - start.x, pos.y - start.y);
                self.overrides
                    .set(entity_id, start_box.translate(delta.0, delta.1));
            }
            InteractionState::Resizing {
                entity_id,
                handle,
                start,
                start_box,
            } => {
                let delta = (pos.x - start.x, pos.y - start.y);
                self.overrides
                    .set(entity_id, resized_box(&start_box, handle, delta.0, delta.1));
            }
            InteractionState::Idle => {
                self.cancel_armed_click_on_slop(pos, scene);
                self.update_hover(pos, scene, snapshot);
            }
        }
    }

    /// An armed OCR click survives only small pointer travel; larger motion
    /// silently downgrades the gesture to a no-op.
    fn cancel_armed_click_on_slop(&mut self, pos: Point, scene: &PageScene) {
        if let Some(armed) = &self.armed_click {
            let slop = scene.tolerance(OCR_CLICK_SLOP_PX);
            if (pos.x - armed.start.x).abs() > slop || (pos.y - armed.start.y).abs() > slop {
                tracing::debug!(block = armed.block_index, "armed block click cancelled");
                self.armed_click = None;
            }
        }
    }

    fn update_hover(&mut self, pos: Point, scene: &PageScene, snapshot: &GestureSnapshot) {
        let tester = HitTester::new(scene);

        self.hover_cursor = CursorStyle::Default;
        if let Some(selected) = snapshot.selected_entity {
            if let Some(entity) = scene.entity(selected) {
                let bbox = self.overrides.get(selected).unwrap_or(entity.bbox_px);
                if let Some(handle) = tester.handle_at(pos, &bbox) {
                    self.hover_cursor = handle.cursor();
                } else if bbox.contains(pos) {
                    self.hover_cursor = CursorStyle::Move;
                }
            }
        }

        self.hover_drawing = if snapshot.stamping_armed() {
            tester.drawing_at(pos).map(|d| d.id)
        } else {
            None
        };
    }
}

/// Apply a handle drag to the gesture's start box. Each grabbed edge is
/// clamped so it never crosses its opposite edge.
fn resized_box(start: &BBox, handle: Handle, dx: f64, dy: f64) -> BBox {
    let mut bbox = *start;
    if handle.moves_top() {
        bbox.y1 = (start.y1 + dy).min(bbox.y2 - MIN_RESIZE_EDGE_GAP_PX);
    }
    if handle.moves_bottom() {
        bbox.y2 = (start.y2 + dy).max(bbox.y1 + MIN_RESIZE_EDGE_GAP_PX);
    }
    if handle.moves_left() {
        bbox.x1 = (start.x1 + dx).min(bbox.x2 - MIN_RESIZE_EDGE_GAP_PX);
    }
    if handle.moves_right() {
        bbox.x2 = (start.x2 + dx).max(bbox.x1 + MIN_RESIZE_EDGE_GAP_PX);
    }
    bbox
}
