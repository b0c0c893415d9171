//! Pointer input handling for the annotation canvas.
//!
//! This module implements the single-pointer interaction engine: entity
//! selection, move/resize with live overrides, draw and stamp creation,
//! linking target toggles, and armed OCR block clicks.
//!
//! ## Architecture
//!
//! An explicit state machine (`InteractionState`) tracks the current gesture
//! mode. Shell-owned flags arrive as an immutable `GestureSnapshot` per
//! event, and every outward effect is returned as a `Command` - the engine
//! is a reducer, not a side-effect site.
//!
//! ## Modules
//!
//! - `events` - pointer event and modifier types
//! - `snapshot` - per-event snapshot of shell-owned flags
//! - `state` - the gesture state machine enum
//! - `pointer_down` - gesture dispatch (selection, draw/stamp/link start)
//! - `pointer_move` - drag updates, hover feedback, click-arm slop
//! - `pointer_up` - gesture finalization and command emission

pub mod events;
pub mod snapshot;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;

pub use events::{Modifiers, PointerDownEvent, PointerMoveEvent, PointerUpEvent};
pub use snapshot::{CreatingEntity, GestureSnapshot, LinkingSession};
pub use state::{ArmedOcrClick, InteractionState};

use uuid::Uuid;

use crate::commands::Command;
use crate::geometry::BBox;
use crate::hit_testing::CursorStyle;
use crate::overrides::LiveOverrides;

/// Outcome of offering a pointer-down to a layer: either the layer captured
/// the gesture, or the input should be offered to whatever sits beneath it.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Consumed(Vec<Command>),
    Declined,
}

impl Dispatch {
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    /// Commands carried by a consumed dispatch; empty when declined.
    pub fn into_commands(self) -> Vec<Command> {
        match self {
            Self::Consumed(commands) => commands,
            Self::Declined => Vec::new(),
        }
    }
}

/// The pointer interaction engine for the entity/OCR layer.
///
/// Owns only transient gesture state; canonical entities and selection live
/// in the external store and are read through [`crate::scene::PageScene`].
#[derive(Debug, Default)]
pub struct InteractionEngine {
    state: InteractionState,
    overrides: LiveOverrides,
    armed_click: Option<ArmedOcrClick>,
    hover_cursor: CursorStyle,
    hover_drawing: Option<Uuid>,
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn gesture_active(&self) -> bool {
        !self.state.is_idle()
    }

    /// Draft box to render while drawing or stamping.
    pub fn draft_box(&self) -> Option<BBox> {
        self.state.draft_box()
    }

    /// Optimistic box for an entity while its edit is uncommitted.
    pub fn override_for(&self, entity_id: Uuid) -> Option<BBox> {
        self.overrides.get(entity_id)
    }

    pub fn overrides(&self) -> &LiveOverrides {
        &self.overrides
    }

    /// Drop an entity's live override once the store's authoritative
    /// geometry has been observed.
    pub fn reconcile_override(&mut self, entity_id: Uuid) {
        self.overrides.reconcile(entity_id);
    }

    /// Cursor to show for the current hover position.
    pub fn hover_cursor(&self) -> CursorStyle {
        self.hover_cursor
    }

    /// Drawing highlighted as the stamp target under the pointer.
    pub fn hover_drawing(&self) -> Option<Uuid> {
        self.hover_drawing
    }

    pub fn armed_click(&self) -> Option<&ArmedOcrClick> {
        self.armed_click.as_ref()
    }

    /// Escape cancels an in-progress draw, or asks the shell to leave
    /// linking mode. It has no effect on other states.
    pub fn handle_escape(&mut self, snapshot: &GestureSnapshot) -> Vec<Command> {
        if self.state.is_drawing() {
            tracing::debug!("escape cancelled drawing gesture");
            self.state.reset();
            return Vec::new();
        }
        if snapshot.is_linking() {
            return vec![Command::CancelLinking];
        }
        Vec::new()
    }
}
