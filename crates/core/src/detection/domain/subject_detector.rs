use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for finding subjects (faces, people) in a frame.
///
/// Returns boxes in frame pixel coordinates; an empty list is a valid
/// "nothing here" answer. `&mut self` lets implementations keep scratch
/// buffers or replay cursors.
pub trait SubjectDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;
}
