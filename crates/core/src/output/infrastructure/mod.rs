pub mod image_directory_sink;
pub mod null_sink;
