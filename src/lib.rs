//! planmark - coordinate transform and pointer interaction core for
//! annotating rasterized plan sheets.
//!
//! The crate has two halves:
//!
//! - a pure, rotation-aware mapping between a page's point space and the
//!   pixel space of its rendered raster ([`geometry`]), used identically for
//!   rendering and hit testing;
//! - a single-pointer interaction engine ([`input`], [`drag_select`],
//!   [`router`]) that disambiguates draw, stamp, move, resize, link-toggle,
//!   and OCR-selection gestures, and emits [`commands::Command`]s to the
//!   external store instead of mutating anything itself.
//!
//! Entities, OCR blocks, and selection state are owned by that store; the
//! core holds only per-gesture state and optimistic live overrides.

pub mod commands;
pub mod constants;
pub mod drag_select;
pub mod geometry;
pub mod hit_testing;
pub mod input;
pub mod overrides;
pub mod router;
pub mod scene;
pub mod spatial_index;
pub mod types;

pub use commands::Command;
pub use drag_select::DragSelect;
pub use geometry::{
    BBox, GeometryError, GeometryResult, Point, RenderMeta, Rotation, canvas_to_pdf,
    pdf_to_canvas, roundtrip_canvas,
};
pub use hit_testing::{CursorStyle, Handle, HitTester};
pub use input::{
    ArmedOcrClick, CreatingEntity, Dispatch, GestureSnapshot, InteractionEngine, InteractionState,
    LinkingSession, Modifiers, PointerDownEvent, PointerMoveEvent, PointerUpEvent,
};
pub use overrides::LiveOverrides;
pub use router::CanvasRouter;
pub use scene::{PageScene, ProjectedBlock, ProjectedEntity};
pub use spatial_index::SpatialIndex;
pub use types::{Entity, EntityKind, EntityMeta, OcrBlock, PanelTab, RelType};
