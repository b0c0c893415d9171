//! Pointer hit testing against projected entities, handles, and OCR blocks.
//!
//! Entity hits respect z-order (topmost first) and a screen-space tolerance
//! converted into raster space. Handle hits are only ever evaluated against
//! the currently selected entity's box.

use std::collections::HashSet;

use uuid::Uuid;

use crate::constants::{ENTITY_HIT_TOLERANCE_PX, HANDLE_HIT_SIZE_PX};
use crate::geometry::{BBox, Point};
use crate::scene::{PageScene, ProjectedEntity};
use crate::types::EntityKind;

/// The nine anchor points of a selected entity's box, named row-major.
/// `Mm` (the center) always resolves to "no handle" and falls through to
/// move semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Tl,
    Tm,
    Tr,
    Ml,
    Mm,
    Mr,
    Bl,
    Bm,
    Br,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::Tl,
        Handle::Tm,
        Handle::Tr,
        Handle::Ml,
        Handle::Mm,
        Handle::Mr,
        Handle::Bl,
        Handle::Bm,
        Handle::Br,
    ];

    /// Anchor position on the given box.
    pub fn anchor(self, bbox: &BBox) -> Point {
        let mid_x = (bbox.x1 + bbox.x2) / 2.0;
        let mid_y = (bbox.y1 + bbox.y2) / 2.0;
        match self {
            Self::Tl => Point::new(bbox.x1, bbox.y1),
            Self::Tm => Point::new(mid_x, bbox.y1),
            Self::Tr => Point::new(bbox.x2, bbox.y1),
            Self::Ml => Point::new(bbox.x1, mid_y),
            Self::Mm => Point::new(mid_x, mid_y),
            Self::Mr => Point::new(bbox.x2, mid_y),
            Self::Bl => Point::new(bbox.x1, bbox.y2),
            Self::Bm => Point::new(mid_x, bbox.y2),
            Self::Br => Point::new(bbox.x2, bbox.y2),
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Self::Tl | Self::Ml | Self::Bl)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Tr | Self::Mr | Self::Br)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Tl | Self::Tm | Self::Tr)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bl | Self::Bm | Self::Br)
    }

    /// Directional cursor for hover feedback over this handle.
    pub fn cursor(self) -> CursorStyle {
        match self {
            Self::Tl | Self::Br => CursorStyle::NwseResize,
            Self::Tr | Self::Bl => CursorStyle::NeswResize,
            Self::Tm | Self::Bm => CursorStyle::NsResize,
            Self::Ml | Self::Mr => CursorStyle::EwResize,
            Self::Mm => CursorStyle::Move,
        }
    }
}

/// Cursor shapes the embedding layer is asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
}

/// Hit testing over one page scene.
pub struct HitTester<'a> {
    scene: &'a PageScene,
}

impl<'a> HitTester<'a> {
    pub fn new(scene: &'a PageScene) -> Self {
        Self { scene }
    }

    /// Topmost entity under the pointer, within the screen-space tolerance.
    ///
    /// Candidates come from the spatial index; the final pick walks the
    /// z-sorted list back to front so the topmost hit wins.
    pub fn entity_at(&self, p: Point) -> Option<&'a ProjectedEntity> {
        let tolerance = self.scene.tolerance(ENTITY_HIT_TOLERANCE_PX);
        let candidates: HashSet<Uuid> = self
            .scene
            .entity_index()
            .query_point_within(p, tolerance)
            .into_iter()
            .collect();

        self.scene
            .entities()
            .iter()
            .rev()
            .find(|e| candidates.contains(&e.id))
    }

    /// Topmost drawing under the pointer, tolerance-expanded. Used for the
    /// stamp-mode hover highlight.
    pub fn drawing_at(&self, p: Point) -> Option<&'a ProjectedEntity> {
        let tolerance = self.scene.tolerance(ENTITY_HIT_TOLERANCE_PX);
        self.scene
            .entities()
            .iter()
            .rev()
            .filter(|e| e.kind == EntityKind::Drawing)
            .find(|e| e.bbox_px.expand(tolerance).contains(p))
    }

    /// Topmost drawing strictly containing the point. Used for the stamp
    /// placement test, which is exact rather than tolerance-expanded.
    pub fn drawing_containing(&self, p: Point) -> Option<&'a ProjectedEntity> {
        self.scene
            .entities()
            .iter()
            .rev()
            .filter(|e| e.kind == EntityKind::Drawing)
            .find(|e| e.bbox_px.contains(p))
    }

    /// OCR block under the pointer, exact containment.
    pub fn block_at(&self, p: Point) -> Option<usize> {
        self.scene.block_index().query_point(p).into_iter().min()
    }

    /// Resize handle of the selected entity's box under the pointer.
    ///
    /// Each handle is a square of side `HANDLE_HIT_SIZE_PX / scale` centered
    /// on its anchor; the first match in row-major order wins and the center
    /// anchor reports as no handle.
    pub fn handle_at(&self, p: Point, selected_box: &BBox) -> Option<Handle> {
        let half = self.scene.tolerance(HANDLE_HIT_SIZE_PX) / 2.0;
        Handle::ALL
            .into_iter()
            .find(|handle| {
                let anchor = handle.anchor(selected_box);
                (p.x - anchor.x).abs() <= half && (p.y - anchor.y).abs() <= half
            })
            .filter(|handle| !matches!(handle, Handle::Mm))
    }
}
