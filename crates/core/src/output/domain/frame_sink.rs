use crate::shared::frame::Frame;

/// Receives each rendered surface, in tick order.
pub trait FrameSink: Send {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
