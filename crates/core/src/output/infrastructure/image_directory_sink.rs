use std::fs;
use std::path::PathBuf;

use crate::output::domain::frame_sink::FrameSink;
use crate::shared::frame::Frame;

/// Writes every frame as `frame_NNNNNN.png` into one directory.
///
/// RGBA overlays keep their alpha channel. The directory is created on
/// the first write.
pub struct ImageDirectorySink {
    dir: PathBuf,
    created: bool,
}

impl ImageDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            created: false,
        }
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }
}

impl FrameSink for ImageDirectorySink {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.created {
            fs::create_dir_all(&self.dir)?;
            self.created = true;
        }

        let path = self.path_for(frame.index());
        let (w, h, data) = (frame.width(), frame.height(), frame.data().to_vec());
        match frame.channels() {
            3 => image::RgbImage::from_raw(w, h, data)
                .ok_or("frame buffer does not match its dimensions")?
                .save(&path)?,
            4 => image::RgbaImage::from_raw(w, h, data)
                .ok_or("frame buffer does not match its dimensions")?
                .save(&path)?,
            n => return Err(format!("cannot write a {n}-channel frame").into()),
        }
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
