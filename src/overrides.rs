//! Live-edit overrides: transient boxes shown while a move or resize is in
//! flight.
//!
//! Canonical geometry stays immutable during a gesture; the override map
//! holds the optimistic box per entity and is reconciled away once the
//! store's authoritative value for that entity is observed.

use std::collections::HashMap;

use uuid::Uuid;

use crate::geometry::BBox;

/// Side map of in-flight boxes (raster pixels) keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct LiveOverrides {
    boxes: HashMap<Uuid, BBox>,
}

impl LiveOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, entity_id: Uuid, bbox: BBox) {
        self.boxes.insert(entity_id, bbox);
    }

    pub fn get(&self, entity_id: Uuid) -> Option<BBox> {
        self.boxes.get(&entity_id).copied()
    }

    /// Drop the override once the authoritative commit has been observed.
    pub fn reconcile(&mut self, entity_id: Uuid) {
        self.boxes.remove(&entity_id);
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }
}
