use crate::rendering::domain::occlusion_renderer::{check_backdrop, OcclusionRenderer};
use crate::rendering::domain::pixel_rect::PixelRect;
use crate::shared::constants::DEFAULT_BLUR_KERNEL;
use crate::shared::frame::Frame;
use crate::tracking::domain::tracked_region::TrackedRegion;

use super::{gaussian, pixels};

/// Gaussian-blurs the pixels under each region.
///
/// Each region is blurred independently: samples never reach outside the
/// clipped rect, so unrelated content cannot bleed in.
pub struct BlurRenderer {
    kernel: Vec<f32>,
}

impl BlurRenderer {
    /// Even kernel sizes are bumped to the next odd size.
    pub fn new(kernel_size: usize) -> Self {
        let size = kernel_size.max(1) | 1;
        Self {
            kernel: gaussian::kernel_1d(size),
        }
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel.len()
    }
}

impl Default for BlurRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_KERNEL)
    }
}

impl OcclusionRenderer for BlurRenderer {
    fn render(
        &self,
        surface: &mut Frame,
        backdrop: Option<&Frame>,
        regions: &[TrackedRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        check_backdrop(surface, backdrop)?;

        let mut roi = Vec::new();
        for region in regions {
            let Some(rect) = PixelRect::clip(&region.bbox, surface.width(), surface.height())
            else {
                continue;
            };

            roi.clear();
            {
                let source: &Frame = match backdrop {
                    Some(b) => b,
                    None => &*surface,
                };
                for y in rect.rows() {
                    for x in rect.cols() {
                        roi.extend_from_slice(&pixels::read_rgb(source, x, y));
                    }
                }
            }

            gaussian::blur(&mut roi, rect.w, rect.h, 3, &self.kernel);

            for (i, rgb) in roi.chunks_exact(3).enumerate() {
                let x = rect.x + i % rect.w;
                let y = rect.y + i / rect.w;
                pixels::write_opaque(surface, x, y, [rgb[0], rgb[1], rgb[2]]);
            }
        }
        Ok(())
    }
}
