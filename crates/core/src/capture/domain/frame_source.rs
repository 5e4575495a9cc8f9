use crate::shared::frame::Frame;

/// Produces one raw frame per tick.
///
/// `Ok(None)` means the source has nothing more to give (end of a
/// recording) and the pipeline stops cleanly.
pub trait FrameSource: Send {
    fn capture(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
