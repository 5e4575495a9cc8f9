pub mod image_sequence_source;
#[cfg(feature = "screen-capture")]
pub mod screen_source;
