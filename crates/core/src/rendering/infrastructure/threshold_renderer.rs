use crate::rendering::domain::occlusion_renderer::{check_backdrop, OcclusionRenderer};
use crate::rendering::domain::pixel_rect::PixelRect;
use crate::shared::constants::{THRESHOLD_BORDER_PX, THRESHOLD_LEVEL};
use crate::shared::frame::Frame;
use crate::tracking::domain::tracked_region::TrackedRegion;

use super::pixels;

/// Reduces each region to a black-and-white silhouette with a white outline.
///
/// Luma is rounded to an 8-bit gray level first; gray levels strictly
/// above `level` become white, the rest black. The outline is drawn inside the clipped rect.
pub struct ThresholdRenderer {
    level: u8,
    border: usize,
}

impl ThresholdRenderer {
    pub fn new(level: u8, border: usize) -> Self {
        Self { level, border }
    }
}

impl Default for ThresholdRenderer {
    fn default() -> Self {
        Self::new(THRESHOLD_LEVEL, THRESHOLD_BORDER_PX)
    }
}

/// ITU-R BT.601 luma rounded to the nearest gray level.
fn gray([r, g, b]: [u8; 3]) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

impl OcclusionRenderer for ThresholdRenderer {
    fn render(
        &self,
        surface: &mut Frame,
        backdrop: Option<&Frame>,
        regions: &[TrackedRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        check_backdrop(surface, backdrop)?;

        for region in regions {
            let Some(rect) = PixelRect::clip(&region.bbox, surface.width(), surface.height())
            else {
                continue;
            };
            for y in rect.rows() {
                for x in rect.cols() {
                    let value = if rect.on_border(x, y, self.border) {
                        255
                    } else {
                        let rgb = match backdrop {
                            Some(b) => pixels::read_rgb(b, x, y),
                            None => pixels::read_rgb(surface, x, y),
                        };
                        if gray(rgb) > self.level {
                            255
                        } else {
                            0
                        }
                    };
                    pixels::write_opaque(surface, x, y, [value; 3]);
                }
            }
        }
        Ok(())
    }
}
