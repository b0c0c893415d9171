//! Immutable snapshot of externally owned interaction flags.
//!
//! The current tool, linking session, and OCR visibility are owned by the
//! shell. Rather than reading them ambiently, every event handler receives
//! this snapshot, keeping the engine a pure reducer over
//! `(snapshot, event) -> commands`.

use uuid::Uuid;

use crate::geometry::BBox;
use crate::types::{EntityKind, RelType};

/// Descriptor of the entity kind currently being created, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatingEntity {
    pub kind: EntityKind,
    /// For instance kinds: the referenced definition's box in page points,
    /// used to derive the stamp size. `None` falls back to the default size.
    pub definition_box: Option<BBox>,
}

/// Active linking session, restricting clicks to target toggling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkingSession {
    pub rel_type: RelType,
}

/// Per-event snapshot of shell-owned state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSnapshot {
    pub creating: Option<CreatingEntity>,
    pub linking: Option<LinkingSession>,
    pub show_ocr: bool,
    pub selected_entity: Option<Uuid>,
}

impl GestureSnapshot {
    pub fn is_linking(&self) -> bool {
        self.linking.is_some()
    }

    /// Whether a stamp tool (instance creation) is armed.
    pub fn stamping_armed(&self) -> bool {
        self.creating.is_some_and(|c| c.kind.is_instance())
    }
}
