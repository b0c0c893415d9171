//! Commands emitted to the external store and UI shell.
//!
//! The interaction core never mutates entities or selection state directly;
//! every outward effect is one of these values. Create/update commands are
//! asynchronous on the store side and fire-and-forget here: the core keeps
//! its optimistic overrides alive until the store's state catches up.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::BBox;
use crate::types::{EntityKind, PanelTab};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Create an entity from a finished draft. The box is in page points.
    FinalizeEntityCreation {
        sheet_number: u32,
        kind: EntityKind,
        bbox: BBox,
    },
    /// Persist new geometry for an existing entity. The box is in page
    /// points; the store confirms asynchronously.
    UpdateEntityBbox { entity_id: Uuid, bbox: BBox },
    /// Toggle a single OCR block's selection on a page.
    ToggleSelectBlock {
        page_index: usize,
        block_index: usize,
        additive: bool,
    },
    /// Replace (or, additively, extend) a page's block selection.
    SetSelectedBlocks {
        page_index: usize,
        indices: Vec<usize>,
        additive: bool,
    },
    /// Toggle an entity's membership in the active linking target set.
    ToggleLinkTarget { entity_id: Uuid },
    /// Ask the shell to leave linking mode.
    CancelLinking,
    /// Select (or clear) the focused entity.
    SetSelectedEntity { entity_id: Option<Uuid> },
    /// Focus a right-panel tab as a selection side effect.
    SetRightPanelTab { tab: PanelTab },
    /// Surface a user-visible failure (stamp misplacement and the like).
    NotifyFailure { message: String },
}
