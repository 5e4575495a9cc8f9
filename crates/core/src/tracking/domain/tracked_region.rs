use crate::shared::bounding_box::BoundingBox;
use crate::shared::clock::Timestamp;

/// A detection box kept alive across ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedRegion {
    pub bbox: BoundingBox,
    /// When a detection last matched this region.
    pub last_seen: Timestamp,
}

impl TrackedRegion {
    pub fn new(bbox: BoundingBox, last_seen: Timestamp) -> Self {
        Self { bbox, last_seen }
    }

    /// Seconds since the region was last confirmed.
    pub fn age(&self, now: Timestamp) -> f64 {
        now - self.last_seen
    }

    pub fn confirm(&mut self, bbox: BoundingBox, now: Timestamp) {
        self.bbox = bbox;
        self.last_seen = now;
    }
}
