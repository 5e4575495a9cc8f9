use crate::rendering::domain::occlusion_renderer::OcclusionRenderer;
use crate::rendering::domain::pixel_rect::PixelRect;
use crate::shared::frame::Frame;
use crate::tracking::domain::tracked_region::TrackedRegion;

use super::pixels;

/// Paints each region with a single colour.
///
/// Alpha 255 gives the opaque black box; lower alpha gives a tint that
/// leaves the subject faintly visible.
pub struct SolidFillRenderer {
    rgba: [u8; 4],
}

impl SolidFillRenderer {
    pub fn new(rgba: [u8; 4]) -> Self {
        Self { rgba }
    }

    pub fn opaque_black() -> Self {
        Self::new([0, 0, 0, 255])
    }

    pub fn tint(rgba: [u8; 4]) -> Self {
        Self::new(rgba)
    }
}

impl Default for SolidFillRenderer {
    fn default() -> Self {
        Self::opaque_black()
    }
}

impl OcclusionRenderer for SolidFillRenderer {
    fn render(
        &self,
        surface: &mut Frame,
        _backdrop: Option<&Frame>,
        regions: &[TrackedRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for region in regions {
            let Some(rect) = PixelRect::clip(&region.bbox, surface.width(), surface.height())
            else {
                continue;
            };
            for y in rect.rows() {
                for x in rect.cols() {
                    pixels::paint(surface, x, y, self.rgba);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;

    fn make_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn region(x: i32, y: i32, w: i32, h: i32) -> TrackedRegion {
        TrackedRegion::new(BoundingBox::new(x, y, w, h), 0.0)
    }

    #[test]
    fn test_no_regions_frame_unchanged() {
        let mut frame = make_frame(20, 20, 128);
        let original = frame.data().to_vec();
        SolidFillRenderer::opaque_black()
            .render(&mut frame, None, &[])
            .unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_fill_blackens_region_only() {
        let mut frame = make_frame(20, 20, 200);
        SolidFillRenderer::opaque_black()
            .render(&mut frame, None, &[region(5, 5, 4, 3)])
            .unwrap();

        assert_eq!(pixels::read_rgb(&frame, 5, 5), [0, 0, 0]);
        assert_eq!(pixels::read_rgb(&frame, 8, 7), [0, 0, 0]);
        assert_eq!(pixels::read_rgb(&frame, 9, 7), [200, 200, 200]);
        assert_eq!(pixels::read_rgb(&frame, 5, 8), [200, 200, 200]);
        assert_eq!(pixels::read_rgb(&frame, 4, 5), [200, 200, 200]);
    }

    #[test]
    fn test_region_partially_off_frame_is_clipped() {
        let mut frame = make_frame(10, 10, 200);
        SolidFillRenderer::opaque_black()
            .render(&mut frame, None, &[region(-5, -5, 8, 8)])
            .unwrap();

        assert_eq!(pixels::read_rgb(&frame, 0, 0), [0, 0, 0]);
        assert_eq!(pixels::read_rgb(&frame, 2, 2), [0, 0, 0]);
        assert_eq!(pixels::read_rgb(&frame, 3, 3), [200, 200, 200]);
    }

    #[test]
    fn test_degenerate_and_off_frame_regions_skipped() {
        let mut frame = make_frame(10, 10, 200);
        let original = frame.data().to_vec();
        SolidFillRenderer::opaque_black()
            .render(
                &mut frame,
                None,
                &[
                    region(2, 2, 0, 5),
                    region(2, 2, 5, -1),
                    region(50, 50, 5, 5),
                ],
            )
            .unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_tint_blends() {
        let mut frame = make_frame(4, 4, 0);
        SolidFillRenderer::tint([255, 0, 0, 128])
            .render(&mut frame, None, &[region(0, 0, 4, 4)])
            .unwrap();
        assert_eq!(pixels::read_rgb(&frame, 3, 3), [128, 0, 0]);
    }

    #[test]
    fn test_overlay_surface_gets_colour_with_alpha() {
        let backdrop = make_frame(4, 4, 50);
        let mut overlay = Frame::transparent_overlay(&backdrop);
        SolidFillRenderer::opaque_black()
            .render(&mut overlay, Some(&backdrop), &[region(1, 1, 2, 2)])
            .unwrap();

        let inside = overlay.offset(1, 1);
        assert_eq!(&overlay.data()[inside..inside + 4], &[0, 0, 0, 255]);
        let outside = overlay.offset(0, 0);
        assert_eq!(&overlay.data()[outside..outside + 4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_default_is_opaque_black() {
        assert_eq!(SolidFillRenderer::default().rgba, [0, 0, 0, 255]);
    }
}
