//! Pointer-down dispatch: decide which gesture a press begins.
//!
//! Priority order: linking target toggles, stamp placement, entity
//! move/resize, draw start, OCR click arming. A press none of these claim
//! is declined so the layer beneath can take it.

use crate::commands::Command;
use crate::constants::DEFAULT_STAMP_SIZE_PX;
use crate::geometry::{BBox, Point, RenderMeta};
use crate::hit_testing::HitTester;
use crate::scene::PageScene;
use crate::types::PanelTab;

use super::snapshot::{CreatingEntity, GestureSnapshot};
use super::state::{ArmedOcrClick, InteractionState};
use super::{Dispatch, InteractionEngine};

impl InteractionEngine {
    pub fn on_pointer_down(
        &mut self,
        event: &super::PointerDownEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Dispatch {
        // One gesture at a time: a stray press while another gesture is in
        // flight is swallowed and the active gesture finishes normally.
        if !self.state.is_idle() {
            return Dispatch::Consumed(Vec::new());
        }

        let tester = HitTester::new(scene);
        let pos = event.position;

        // Linking mode captures the whole layer: clicks only toggle targets
        // permitted by the relation's allow-list, everything else is inert.
        if let Some(linking) = &snapshot.linking {
            if let Some(hit) = tester.entity_at(pos) {
                if linking.rel_type.allows_target(hit.kind) {
                    return Dispatch::Consumed(vec![Command::ToggleLinkTarget {
                        entity_id: hit.id,
                    }]);
                }
            }
            return Dispatch::Consumed(Vec::new());
        }

        // Instance tools stamp on press, even over existing entities.
        if let Some(creating) = &snapshot.creating {
            if creating.kind.is_instance() {
                return self.begin_stamp(pos, scene, creating);
            }
        }

        if let Some(hit) = tester.entity_at(pos) {
            let commands = vec![
                Command::SetSelectedEntity {
                    entity_id: Some(hit.id),
                },
                Command::SetRightPanelTab {
                    tab: PanelTab::Entities,
                },
            ];

            // Chain consecutive edits off the live override, not the stale
            // canonical box.
            let start_box = self.overrides.get(hit.id).unwrap_or(hit.bbox_px);

            if snapshot.selected_entity == Some(hit.id) {
                if let Some(handle) = tester.handle_at(pos, &start_box) {
                    tracing::debug!(entity = %hit.id, ?handle, "resize gesture started");
                    self.state = InteractionState::Resizing {
                        entity_id: hit.id,
                        handle,
                        start: pos,
                        start_box,
                    };
                    return Dispatch::Consumed(commands);
                }
            }

            tracing::debug!(entity = %hit.id, "move gesture started");
            self.state = InteractionState::Moving {
                entity_id: hit.id,
                start: pos,
                start_box,
            };
            return Dispatch::Consumed(commands);
        }

        if snapshot.creating.is_some() {
            self.state = InteractionState::Drawing {
                start: pos,
                draft: BBox::new(pos.x, pos.y, pos.x, pos.y),
            };
            return Dispatch::Consumed(Vec::new());
        }

        if snapshot.show_ocr {
            if let Some(block_index) = tester.block_at(pos) {
                self.armed_click = Some(ArmedOcrClick {
                    start: pos,
                    block_index,
                    additive: event.modifiers.additive(),
                });
                return Dispatch::Consumed(Vec::new());
            }
        }

        // Nothing here wants the press; let the layer beneath take it.
        Dispatch::Declined
    }

    fn begin_stamp(
        &mut self,
        pos: Point,
        scene: &PageScene,
        creating: &CreatingEntity,
    ) -> Dispatch {
        let (width, height) = stamp_size_px(creating.definition_box.as_ref(), scene.meta());
        let centered = BBox::new(
            pos.x - width / 2.0,
            pos.y - height / 2.0,
            pos.x + width / 2.0,
            pos.y + height / 2.0,
        );

        let tester = HitTester::new(scene);
        self.hover_drawing = tester.drawing_at(pos).map(|d| d.id);

        let draft = match tester.drawing_containing(pos) {
            Some(drawing) => {
                if width > drawing.bbox_px.width() || height > drawing.bbox_px.height() {
                    tracing::warn!(
                        drawing = %drawing.id,
                        "stamp size exceeds target drawing, refusing draft"
                    );
                    self.state = InteractionState::Stamping { draft: None };
                    return Dispatch::Consumed(vec![Command::NotifyFailure {
                        message: "Symbol is larger than the target drawing".into(),
                    }]);
                }
                Some(clamp_into(centered, &drawing.bbox_px))
            }
            // Armed unclamped; the placement test at pointer up decides.
            None => Some(centered),
        };

        self.state = InteractionState::Stamping { draft };
        Dispatch::Consumed(Vec::new())
    }
}

/// Stamp size in raster pixels: the referenced definition's point-space box
/// scaled into this page's pixel units, or the default square.
fn stamp_size_px(definition_box: Option<&BBox>, meta: &RenderMeta) -> (f64, f64) {
    match definition_box {
        Some(def) => (def.width() * meta.scale_x(), def.height() * meta.scale_y()),
        None => (DEFAULT_STAMP_SIZE_PX, DEFAULT_STAMP_SIZE_PX),
    }
}

/// Translate `bbox` so it lies fully inside `container`. The caller
/// guarantees it fits.
fn clamp_into(bbox: BBox, container: &BBox) -> BBox {
    let dx = if bbox.x1 < container.x1 {
        container.x1 - bbox.x1
    } else if bbox.x2 > container.x2 {
        container.x2 - bbox.x2
    } else {
        0.0
    };
    let dy = if bbox.y1 < container.y1 {
        container.y1 - bbox.y1
    } else if bbox.y2 > container.y2 {
        container.y2 - bbox.y2
    } else {
        0.0
    };
    bbox.translate(dx, dy)
}
