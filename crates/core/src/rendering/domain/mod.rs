pub mod occlusion_renderer;
pub mod occlusion_style;
pub mod pixel_rect;
pub mod render_target;
