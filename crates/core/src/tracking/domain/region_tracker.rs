use crate::shared::bounding_box::BoundingBox;
use crate::shared::clock::Timestamp;

use super::tracked_region::TrackedRegion;

/// Domain interface for turning per-frame detections into persistent regions.
///
/// `update` is a synchronous state transition and must not be called
/// concurrently; `&mut self` enforces that.
pub trait RegionTracker: Send {
    /// Reconciles this tick's detections and returns the live regions.
    ///
    /// `now` should be non-decreasing across calls. An empty `detections`
    /// slice is a normal "nothing seen" tick.
    fn update(&mut self, detections: &[BoundingBox], now: Timestamp) -> &[TrackedRegion];

    /// Regions as of the last `update`.
    fn regions(&self) -> &[TrackedRegion];

    /// Forgets every region.
    fn reset(&mut self);
}
