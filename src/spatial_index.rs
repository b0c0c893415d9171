//! R-tree spatial indexing for hit testing.
//!
//! Reduces point and rectangle queries over projected boxes from O(n) to
//! O(log n). Indexes are bulk-loaded once per page render and queried on
//! every pointer event.

use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use std::hash::Hash;

use crate::geometry::{BBox, Point};

/// One indexed box, keyed by the owner (entity id or block index).
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry<K> {
    pub key: K,
    pub bbox: BBox,
}

impl<K> SpatialEntry<K> {
    pub fn new(key: K, bbox: BBox) -> Self {
        Self { key, bbox }
    }
}

impl<K> RTreeObject for SpatialEntry<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.x1, self.bbox.y1], [self.bbox.x2, self.bbox.y2])
    }
}

impl<K: PartialEq> PartialEq for SpatialEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Spatial index over boxes in one coordinate space.
pub struct SpatialIndex<K> {
    tree: RTree<SpatialEntry<K>>,
    entries: HashMap<K, SpatialEntry<K>>,
}

impl<K: Copy + Eq + Hash> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Bulk-load an index from keyed boxes.
    pub fn from_boxes<I>(boxes: I) -> Self
    where
        I: Iterator<Item = (K, BBox)>,
    {
        let entries: Vec<SpatialEntry<K>> = boxes
            .map(|(key, bbox)| SpatialEntry::new(key, bbox))
            .collect();
        let entries_map: HashMap<K, SpatialEntry<K>> =
            entries.iter().map(|e| (e.key, *e)).collect();

        Self {
            tree: RTree::bulk_load(entries),
            entries: entries_map,
        }
    }

    pub fn insert(&mut self, key: K, bbox: BBox) {
        if let Some(old_entry) = self.entries.remove(&key) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(key, bbox);
        self.tree.insert(entry);
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: K) -> bool {
        if let Some(entry) = self.entries.remove(&key) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Keys of all boxes containing the point exactly.
    pub fn query_point(&self, p: Point) -> Vec<K> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bbox.contains(p))
            .map(|entry| entry.key)
            .collect()
    }

    /// Keys of all boxes containing the point after expanding each box by
    /// `margin` on every side.
    pub fn query_point_within(&self, p: Point, margin: f64) -> Vec<K> {
        let envelope = AABB::from_corners([p.x - margin, p.y - margin], [p.x + margin, p.y + margin]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bbox.expand(margin).contains(p))
            .map(|entry| entry.key)
            .collect()
    }

    /// Keys of all boxes intersecting the rectangle. Touching edges count;
    /// only full separation on an axis rejects.
    pub fn query_rect(&self, rect: &BBox) -> Vec<K> {
        let envelope = AABB::from_corners([rect.x1, rect.y1], [rect.x2, rect.y2]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bbox.intersects(rect))
            .map(|entry| entry.key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
