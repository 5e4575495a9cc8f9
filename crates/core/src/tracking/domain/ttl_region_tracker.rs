use crate::shared::bounding_box::BoundingBox;
use crate::shared::clock::Timestamp;

use super::region_tracker::RegionTracker;
use super::tracked_region::TrackedRegion;
use super::tracker_config::TrackerConfig;

/// Greedy, order-dependent tracker with time-based expiry.
///
/// Each detection, in the order given, is compared against the current
/// regions in insertion order (including regions appended earlier in the
/// same tick). The first region it [`matches`](BoundingBox::matches) takes
/// the new box and timestamp in place; with no match the detection is
/// appended. Afterwards every region older than the TTL is dropped.
///
/// Two detections in one tick may hit the same region one after the
/// other, in which case the later detection's box is the one kept.
///
/// Expiry compares `now - last_seen` against the TTL in plain `f64`, so
/// a region seen at a timestamp with no exact binary form can drop out
/// already at `last_seen + ttl` (e.g. seen at 0.1 with TTL 0.2, gone at
/// `0.1 + 0.2`).
pub struct TtlRegionTracker {
    config: TrackerConfig,
    regions: Vec<TrackedRegion>,
}

impl TtlRegionTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            regions: Vec::new(),
        }
    }

    fn absorb(&mut self, detection: BoundingBox, now: Timestamp) {
        match self.regions.iter().position(|r| detection.matches(&r.bbox)) {
            Some(i) => self.regions[i].confirm(detection, now),
            None => self.regions.push(TrackedRegion::new(detection, now)),
        }
    }
}

impl Default for TtlRegionTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl RegionTracker for TtlRegionTracker {
    fn update(&mut self, detections: &[BoundingBox], now: Timestamp) -> &[TrackedRegion] {
        for &detection in detections {
            self.absorb(detection, now);
        }

        let ttl = self.config.ttl();
        self.regions.retain(|r| r.age(now) <= ttl);
        &self.regions
    }

    fn regions(&self) -> &[TrackedRegion] {
        &self.regions
    }

    fn reset(&mut self) {
        self.regions.clear();
    }
}
