use crate::shared::frame::Frame;
use crate::tracking::domain::tracked_region::TrackedRegion;

/// Domain interface for painting occlusion over tracked regions.
///
/// `surface` is what gets painted: either the captured frame itself or a
/// transparent RGBA overlay of the same size. Styles that need the
/// underlying pixels (threshold, blur) read them from `backdrop` when
/// given, otherwise from `surface`.
///
/// Renderers own all geometric sanitising: boxes are clipped to the
/// surface and degenerate or fully off-screen boxes are skipped.
pub trait OcclusionRenderer: Send {
    fn render(
        &self,
        surface: &mut Frame,
        backdrop: Option<&Frame>,
        regions: &[TrackedRegion],
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Rejects a backdrop whose size differs from the surface.
pub fn check_backdrop(surface: &Frame, backdrop: Option<&Frame>) -> Result<(), String> {
    match backdrop {
        Some(b) if b.width() != surface.width() || b.height() != surface.height() => Err(format!(
            "backdrop is {}x{} but surface is {}x{}",
            b.width(),
            b.height(),
            surface.width(),
            surface.height()
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0; (w * h * 3) as usize], w, h, 3, 0)
    }

    #[test]
    fn test_check_backdrop_accepts_missing_or_matching() {
        let surface = frame(4, 4);
        assert!(check_backdrop(&surface, None).is_ok());
        assert!(check_backdrop(&surface, Some(&frame(4, 4))).is_ok());
    }

    #[test]
    fn test_check_backdrop_rejects_size_mismatch() {
        let surface = frame(4, 4);
        let err = check_backdrop(&surface, Some(&frame(5, 4))).unwrap_err();
        assert!(err.contains("5x4"));
    }
}
