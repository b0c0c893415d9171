//! Per-render projection of page data into raster pixel space.
//!
//! Entities and OCR blocks are stored in point space; hit testing and
//! gesture math happen in raster pixels. A [`PageScene`] performs that
//! projection exactly once per render and carries the spatial indexes the
//! hit tester queries on every pointer event.

use uuid::Uuid;

use crate::geometry::{BBox, GeometryError, GeometryResult, RenderMeta, pdf_to_canvas};
use crate::spatial_index::SpatialIndex;
use crate::types::{Entity, EntityKind, OcrBlock};

/// An entity projected into raster pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEntity {
    pub id: Uuid,
    pub kind: EntityKind,
    /// Bounding box in raster pixels.
    pub bbox_px: BBox,
    /// Canonical bounding box in page points.
    pub bbox_pts: BBox,
}

/// An OCR block projected into raster pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedBlock {
    pub index: usize,
    pub bbox_px: BBox,
}

/// Everything the interaction engine needs to know about the displayed page,
/// valid for one render.
pub struct PageScene {
    page_index: usize,
    meta: RenderMeta,
    scale: f64,
    /// Page entities sorted by z-order, bottom to top; stable within a rank.
    entities: Vec<ProjectedEntity>,
    entity_index: SpatialIndex<Uuid>,
    blocks: Vec<ProjectedBlock>,
    block_index: SpatialIndex<usize>,
}

impl PageScene {
    /// Project the given page's entities and OCR blocks. `scale` is the
    /// uniform display zoom applied on top of the raster transform.
    pub fn build(
        page_index: usize,
        entities: &[Entity],
        blocks: &[OcrBlock],
        meta: RenderMeta,
        scale: f64,
    ) -> GeometryResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GeometryError::InvalidScale);
        }

        let sheet_number = page_index as u32 + 1;
        let mut projected: Vec<ProjectedEntity> = Vec::new();
        for entity in entities.iter().filter(|e| e.sheet_number == sheet_number) {
            projected.push(ProjectedEntity {
                id: entity.id,
                kind: entity.kind(),
                bbox_px: pdf_to_canvas(entity.bounding_box, &meta)?,
                bbox_pts: entity.bounding_box,
            });
        }
        projected.sort_by_key(|e| e.kind.z_order());
        let entity_index = SpatialIndex::from_boxes(projected.iter().map(|e| (e.id, e.bbox_px)));

        let mut projected_blocks: Vec<ProjectedBlock> = Vec::new();
        for block in blocks {
            projected_blocks.push(ProjectedBlock {
                index: block.index,
                bbox_px: pdf_to_canvas(block.bbox, &meta)?,
            });
        }
        let block_index =
            SpatialIndex::from_boxes(projected_blocks.iter().map(|b| (b.index, b.bbox_px)));

        Ok(Self {
            page_index,
            meta,
            scale,
            entities: projected,
            entity_index,
            blocks: projected_blocks,
            block_index,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn sheet_number(&self) -> u32 {
        self.page_index as u32 + 1
    }

    pub fn meta(&self) -> &RenderMeta {
        &self.meta
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn entities(&self) -> &[ProjectedEntity] {
        &self.entities
    }

    pub fn entity(&self, id: Uuid) -> Option<&ProjectedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_index(&self) -> &SpatialIndex<Uuid> {
        &self.entity_index
    }

    pub fn blocks(&self) -> &[ProjectedBlock] {
        &self.blocks
    }

    pub fn block_index(&self) -> &SpatialIndex<usize> {
        &self.block_index
    }

    /// Convert a screen-pixel tolerance into this scene's comparison space.
    pub fn tolerance(&self, screen_px: f64) -> f64 {
        screen_px / self.scale
    }
}
