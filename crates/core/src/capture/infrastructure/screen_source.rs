use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Grabs the whole of one monitor on every tick via `xcap`.
pub struct ScreenSource {
    monitor: xcap::Monitor,
    ticks: usize,
}

impl ScreenSource {
    /// Opens monitor `index` in `xcap` enumeration order, or the primary
    /// monitor when `index` is `None`.
    pub fn open(index: Option<usize>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut monitors = xcap::Monitor::all()?;
        if monitors.is_empty() {
            return Err("no monitors available for capture".into());
        }

        let position = match index {
            Some(i) if i < monitors.len() => i,
            Some(i) => {
                return Err(format!("monitor {i} not found ({} available)", monitors.len()).into())
            }
            None => monitors.iter().position(|m| m.is_primary()).unwrap_or(0),
        };
        let monitor = monitors.swap_remove(position);
        log::info!(
            "Capturing monitor {position} \"{}\" ({}x{})",
            monitor.name(),
            monitor.width(),
            monitor.height()
        );

        Ok(Self { monitor, ticks: 0 })
    }
}

// Safety: the pipeline drives a ScreenSource from a single thread only.
unsafe impl Send for ScreenSource {}

impl FrameSource for ScreenSource {
    fn capture(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let image = self.monitor.capture_image()?;
        let (width, height) = image.dimensions();
        let frame = Frame::from_rgba(image.as_raw(), width, height, self.ticks);
        self.ticks += 1;
        Ok(Some(frame))
    }
}
