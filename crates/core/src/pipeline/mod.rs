pub mod overlay_pipeline;
pub mod pipeline_logger;
