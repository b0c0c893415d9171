//! Core data model: entities, OCR blocks, and relation types.
//!
//! Entities and OCR blocks are owned by the external store; this crate only
//! reads them and asks for mutation through emitted commands. Bounding boxes
//! are always stored in page point space.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::BBox;

/// The closed set of entity kinds recognized on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Drawing,
    Legend,
    Schedule,
    Note,
    SymbolDefinition,
    ComponentDefinition,
    SymbolInstance,
    ComponentInstance,
    Scope,
}

impl EntityKind {
    /// Render and hit-test order, bottom to top. Container kinds sit below
    /// the instances defined on top of them.
    pub fn z_order(self) -> u8 {
        match self {
            Self::Drawing => 0,
            Self::Legend | Self::Schedule => 1,
            Self::Scope => 2,
            Self::Note => 3,
            Self::SymbolDefinition | Self::ComponentDefinition => 4,
            Self::SymbolInstance | Self::ComponentInstance => 5,
        }
    }

    /// Instance kinds are placed by stamping rather than drawing.
    pub fn is_instance(self) -> bool {
        matches!(self, Self::SymbolInstance | Self::ComponentInstance)
    }
}

/// Kind-specific attributes. The variant determines the entity's kind,
/// so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum EntityMeta {
    Drawing {
        title: String,
        description: String,
    },
    Legend {
        title: String,
    },
    Schedule {
        title: String,
    },
    Note {
        text: String,
    },
    Scope {
        name: String,
        description: String,
    },
    SymbolDefinition {
        name: String,
        description: String,
    },
    ComponentDefinition {
        name: String,
        description: String,
    },
    SymbolInstance {
        definition_id: Option<Uuid>,
        recognized_text: Option<String>,
    },
    ComponentInstance {
        definition_id: Option<Uuid>,
    },
}

impl EntityMeta {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Drawing { .. } => EntityKind::Drawing,
            Self::Legend { .. } => EntityKind::Legend,
            Self::Schedule { .. } => EntityKind::Schedule,
            Self::Note { .. } => EntityKind::Note,
            Self::Scope { .. } => EntityKind::Scope,
            Self::SymbolDefinition { .. } => EntityKind::SymbolDefinition,
            Self::ComponentDefinition { .. } => EntityKind::ComponentDefinition,
            Self::SymbolInstance { .. } => EntityKind::SymbolInstance,
            Self::ComponentInstance { .. } => EntityKind::ComponentInstance,
        }
    }
}

/// A typed, positioned annotation on one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    /// One-based sheet number the entity belongs to.
    pub sheet_number: u32,
    /// Bounding box in page point space.
    pub bounding_box: BBox,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

impl Entity {
    pub fn new(sheet_number: u32, bounding_box: BBox, meta: EntityMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            sheet_number,
            bounding_box,
            meta,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.meta.kind()
    }
}

/// An OCR-recognized text block on a page. Read-only to the core; selection
/// state lives in the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrBlock {
    pub index: usize,
    pub text: String,
    /// Bounding box in page point space.
    pub bbox: BBox,
    pub confidence: f64,
}

/// Relation types available in linking mode, each with a closed allow-list
/// of target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelType {
    JustifiedBy,
    Depicts,
    LocatedIn,
}

impl RelType {
    /// Whether an entity of the given kind may be toggled as a link target
    /// for this relation.
    pub fn allows_target(self, kind: EntityKind) -> bool {
        match self {
            Self::JustifiedBy => matches!(
                kind,
                EntityKind::Note | EntityKind::SymbolInstance | EntityKind::ComponentInstance
            ),
            Self::Depicts => matches!(kind, EntityKind::Drawing),
            Self::LocatedIn => matches!(
                kind,
                EntityKind::SymbolInstance | EntityKind::ComponentInstance
            ),
        }
    }
}

/// Right-panel tab requested after selection side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTab {
    Blocks,
    Entities,
}
