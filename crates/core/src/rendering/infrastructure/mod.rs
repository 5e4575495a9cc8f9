pub mod blur_renderer;
mod gaussian;
mod pixels;
pub mod renderer_factory;
pub mod solid_fill_renderer;
pub mod threshold_renderer;
