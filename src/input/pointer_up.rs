//! Pointer-up handling: finalize or discard the active gesture.
//!
//! Every path lands back in `Idle`. Creation drafts are converted to point
//! space before leaving the engine; move/resize commits keep their live
//! override alive until the store's authoritative geometry is observed.

use uuid::Uuid;

use crate::commands::Command;
use crate::constants::{MIN_DRAW_SIZE_PX, OCR_CLICK_SLOP_PX};
use crate::geometry::{BBox, canvas_to_pdf};
use crate::hit_testing::HitTester;
use crate::scene::PageScene;
use crate::types::PanelTab;

use super::snapshot::GestureSnapshot;
use super::state::InteractionState;
use super::{InteractionEngine, PointerUpEvent};

impl InteractionEngine {
    pub fn on_pointer_up(
        &mut self,
        event: &PointerUpEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Vec<Command> {
        let state = std::mem::take(&mut self.state);

        match state {
            InteractionState::Idle => self.confirm_armed_click(event, scene),
            InteractionState::Drawing { draft, .. } => self.finish_draw(draft, scene, snapshot),
            InteractionState::Stamping { draft } => self.finish_stamp(draft, scene, snapshot),
            InteractionState::Moving { entity_id, .. }
            | InteractionState::Resizing { entity_id, .. } => self.commit_edit(entity_id, scene),
        }
    }

    fn confirm_armed_click(&mut self, event: &PointerUpEvent, scene: &PageScene) -> Vec<Command> {
        let Some(armed) = self.armed_click.take() else {
            return Vec::new();
        };
        let slop = scene.tolerance(OCR_CLICK_SLOP_PX);
        let moved = (event.position.x - armed.start.x).abs() > slop
            || (event.position.y - armed.start.y).abs() > slop;
        if moved {
            return Vec::new();
        }
        vec![Command::ToggleSelectBlock {
            page_index: scene.page_index(),
            block_index: armed.block_index,
            additive: armed.additive,
        }]
    }

    fn finish_draw(
        &mut self,
        draft: BBox,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Vec<Command> {
        if draft.width() < MIN_DRAW_SIZE_PX || draft.height() < MIN_DRAW_SIZE_PX {
            tracing::debug!("draft below minimum size, discarded");
            return Vec::new();
        }
        // The tool can be cleared externally mid-gesture; the draft is then
        // stale and dropped.
        let Some(creating) = &snapshot.creating else {
            return Vec::new();
        };
        self.finalize_creation(draft, creating.kind, scene)
    }

    fn finish_stamp(
        &mut self,
        draft: Option<BBox>,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Vec<Command> {
        self.hover_drawing = None;

        // Refused at press; the failure was already surfaced there.
        let Some(draft) = draft else {
            return Vec::new();
        };
        let Some(creating) = &snapshot.creating else {
            return Vec::new();
        };

        let tester = HitTester::new(scene);
        if tester.drawing_containing(draft.center()).is_none() {
            tracing::warn!("stamp released outside any drawing, discarded");
            return vec![Command::NotifyFailure {
                message: "Place the symbol inside a drawing".into(),
            }];
        }
        self.finalize_creation(draft, creating.kind, scene)
    }

    fn finalize_creation(
        &mut self,
        draft: BBox,
        kind: crate::types::EntityKind,
        scene: &PageScene,
    ) -> Vec<Command> {
        match canvas_to_pdf(draft, scene.meta()) {
            Ok(bbox) => {
                tracing::debug!(?kind, "entity creation finalized");
                vec![
                    Command::FinalizeEntityCreation {
                        sheet_number: scene.sheet_number(),
                        kind,
                        bbox,
                    },
                    Command::SetRightPanelTab {
                        tab: PanelTab::Entities,
                    },
                ]
            }
            Err(err) => {
                tracing::error!(%err, "draft box failed to convert to point space");
                vec![Command::NotifyFailure {
                    message: format!("Could not place the box: {err}"),
                }]
            }
        }
    }

    fn commit_edit(&mut self, entity_id: Uuid, scene: &PageScene) -> Vec<Command> {
        // A press-and-release without motion writes no override and commits
        // nothing.
        let Some(bbox_px) = self.overrides.get(entity_id) else {
            return Vec::new();
        };
        match canvas_to_pdf(bbox_px, scene.meta()) {
            Ok(bbox) => {
                tracing::debug!(entity = %entity_id, "bounding box commit issued");
                // The override stays until the store confirms; see
                // `reconcile_override`.
                vec![Command::UpdateEntityBbox { entity_id, bbox }]
            }
            Err(err) => {
                tracing::error!(%err, entity = %entity_id, "edited box failed to convert");
                self.overrides.reconcile(entity_id);
                vec![Command::NotifyFailure {
                    message: format!("Could not update the box: {err}"),
                }]
            }
        }
    }
}
