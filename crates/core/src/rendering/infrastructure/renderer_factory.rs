use crate::rendering::domain::occlusion_renderer::OcclusionRenderer;
use crate::rendering::domain::occlusion_style::OcclusionStyle;
use crate::shared::constants::{DEFAULT_BLUR_KERNEL, DEFAULT_TINT_RGBA};

use super::blur_renderer::BlurRenderer;
use super::solid_fill_renderer::SolidFillRenderer;
use super::threshold_renderer::ThresholdRenderer;

/// Style parameters that only some renderers use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub blur_kernel: usize,
    pub tint: [u8; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_BLUR_KERNEL,
            tint: DEFAULT_TINT_RGBA,
        }
    }
}

/// Builds the renderer for `style`.
pub fn create_renderer(style: OcclusionStyle, options: &RenderOptions) -> Box<dyn OcclusionRenderer> {
    match style {
        OcclusionStyle::Fill => {
            log::info!("Occluding with opaque fill");
            Box::new(SolidFillRenderer::opaque_black())
        }
        OcclusionStyle::Tint => {
            log::info!("Occluding with tint {:?}", options.tint);
            Box::new(SolidFillRenderer::tint(options.tint))
        }
        OcclusionStyle::Threshold => {
            log::info!("Occluding with threshold silhouette");
            Box::new(ThresholdRenderer::default())
        }
        OcclusionStyle::Blur => {
            log::info!("Occluding with Gaussian blur (kernel_size={})", options.blur_kernel);
            Box::new(BlurRenderer::new(options.blur_kernel))
        }
    }
}
