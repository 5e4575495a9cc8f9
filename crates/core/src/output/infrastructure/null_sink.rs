use crate::output::domain::frame_sink::FrameSink;
use crate::shared::frame::Frame;

/// Discards every frame. Used when no `--output` directory is given.
pub struct NullSink;

impl FrameSink for NullSink {
    fn write(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
