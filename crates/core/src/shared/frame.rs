use ndarray::ArrayView3;

/// One captured screen image: interleaved 8-bit pixels, row-major.
///
/// Captured frames are RGB (3 channels). Overlay surfaces are RGBA
/// (4 channels) and start fully transparent. Colour conversion happens at
/// capture and output boundaries only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Fully transparent RGBA surface matching `like`'s size and index.
    pub fn transparent_overlay(like: &Frame) -> Self {
        let len = like.width as usize * like.height as usize * 4;
        Self::new(vec![0; len], like.width, like.height, 4, like.index)
    }

    /// Drops the alpha channel of packed RGBA pixels.
    pub fn from_rgba(rgba: &[u8], width: u32, height: u32, index: usize) -> Self {
        let rgb = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::new(rgb, width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Tick number the frame was captured on.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of pixel `(x, y)`. Callers keep coordinates in bounds.
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * self.channels as usize
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
