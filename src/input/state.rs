//! Interaction state machine - one explicit state per gesture mode.
//!
//! A single enum replaces scattered flags so impossible combinations
//! (drawing while resizing, two concurrent drags) cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing    (pointer down with a generic creation tool)
//! Idle -> Stamping   (pointer down with an instance creation tool)
//! Idle -> Moving     (pointer down on an entity body)
//! Idle -> Resizing   (pointer down on a selected entity's handle)
//!
//! Any  -> Idle       (pointer up finalizes; Escape cancels Drawing)
//! ```

use uuid::Uuid;

use crate::geometry::{BBox, Point};
use crate::hit_testing::Handle;

/// The in-progress gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No active gesture.
    #[default]
    Idle,

    /// Dragging out a new entity box.
    Drawing {
        /// Gesture start in raster pixels.
        start: Point,
        /// Normalized rectangle between start and the current pointer.
        draft: BBox,
    },

    /// Placing a fixed-size instance box with a single click.
    Stamping {
        /// Armed draft, already clamped into its container. `None` when the
        /// stamp was refused at pointer down.
        draft: Option<BBox>,
    },

    /// Translating one entity's box.
    Moving {
        entity_id: Uuid,
        start: Point,
        /// Box at gesture start (override-aware), raster pixels.
        start_box: BBox,
    },

    /// Adjusting one or two edges of one entity's box.
    Resizing {
        entity_id: Uuid,
        handle: Handle,
        start: Point,
        start_box: BBox,
    },
}

/// An OCR block click armed at pointer down and confirmed (or silently
/// dropped) at pointer up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmedOcrClick {
    pub start: Point,
    pub block_index: usize,
    pub additive: bool,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_stamping(&self) -> bool {
        matches!(self, Self::Stamping { .. })
    }

    /// True while an entity box is being moved or resized.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Moving { .. } | Self::Resizing { .. })
    }

    /// The draft box shown while drawing or stamping, if any.
    pub fn draft_box(&self) -> Option<BBox> {
        match self {
            Self::Drawing { draft, .. } => Some(*draft),
            Self::Stamping { draft } => *draft,
            _ => None,
        }
    }

    /// Entity being moved or resized, if any.
    pub fn edited_entity(&self) -> Option<Uuid> {
        match self {
            Self::Moving { entity_id, .. } | Self::Resizing { entity_id, .. } => Some(*entity_id),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
