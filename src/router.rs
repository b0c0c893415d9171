//! Ordered layer routing for pointer input.
//!
//! Layers form an explicit ownership hierarchy: the entity engine is asked
//! first, the OCR drag-select overlay second, and a still-declined press is
//! returned to the embedder so whatever sits visually beneath the canvas
//! can take it. Whichever layer consumes a press captures the rest of that
//! gesture's moves and the release.

use uuid::Uuid;

use crate::commands::Command;
use crate::drag_select::DragSelect;
use crate::input::{
    Dispatch, GestureSnapshot, InteractionEngine, PointerDownEvent, PointerMoveEvent,
    PointerUpEvent,
};
use crate::scene::PageScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Entities,
    DragSelect,
}

/// Routes pointer and key events through the canvas layers.
#[derive(Debug, Default)]
pub struct CanvasRouter {
    engine: InteractionEngine,
    drag_select: DragSelect,
    capture: Option<Capture>,
}

impl CanvasRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    pub fn drag_select(&self) -> &DragSelect {
        &self.drag_select
    }

    pub fn on_pointer_down(
        &mut self,
        event: &PointerDownEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Dispatch {
        match self.engine.on_pointer_down(event, scene, snapshot) {
            Dispatch::Consumed(commands) => {
                self.capture = Some(Capture::Entities);
                Dispatch::Consumed(commands)
            }
            Dispatch::Declined => {
                if snapshot.show_ocr {
                    let dispatch = self.drag_select.on_pointer_down(event);
                    if !dispatch.is_declined() {
                        self.capture = Some(Capture::DragSelect);
                    }
                    return dispatch;
                }
                Dispatch::Declined
            }
        }
    }

    pub fn on_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) {
        match self.capture {
            Some(Capture::DragSelect) => self.drag_select.on_pointer_move(event),
            // Uncaptured moves still feed the engine for hover feedback.
            Some(Capture::Entities) | None => self.engine.on_pointer_move(event, scene, snapshot),
        }
    }

    pub fn on_pointer_up(
        &mut self,
        event: &PointerUpEvent,
        scene: &PageScene,
        snapshot: &GestureSnapshot,
    ) -> Vec<Command> {
        match self.capture.take() {
            Some(Capture::DragSelect) => self.drag_select.on_pointer_up(event, scene),
            Some(Capture::Entities) | None => self.engine.on_pointer_up(event, scene, snapshot),
        }
    }

    pub fn on_escape(&mut self, snapshot: &GestureSnapshot) -> Vec<Command> {
        if self.capture == Some(Capture::DragSelect) {
            self.drag_select.cancel();
            self.capture = None;
            return Vec::new();
        }
        self.engine.handle_escape(snapshot)
    }

    /// Forwarded store acknowledgement; see
    /// [`InteractionEngine::reconcile_override`].
    pub fn reconcile_override(&mut self, entity_id: Uuid) {
        self.engine.reconcile_override(entity_id);
    }
}
