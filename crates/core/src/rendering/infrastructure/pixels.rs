//! Per-pixel access shared by the renderers. Surfaces are RGB or RGBA.

use crate::shared::frame::Frame;

pub fn read_rgb(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
    let i = frame.offset(x, y);
    let d = frame.data();
    [d[i], d[i + 1], d[i + 2]]
}

/// Writes a fully opaque pixel.
pub fn write_opaque(surface: &mut Frame, x: usize, y: usize, rgb: [u8; 3]) {
    let i = surface.offset(x, y);
    let has_alpha = surface.has_alpha();
    let d = surface.data_mut();
    d[i..i + 3].copy_from_slice(&rgb);
    if has_alpha {
        d[i + 3] = 255;
    }
}

/// Paints `rgba` over a pixel.
///
/// RGB surfaces are alpha-blended in place. RGBA surfaces take the colour
/// as-is so whatever composites the overlay does the blending.
pub fn paint(surface: &mut Frame, x: usize, y: usize, rgba: [u8; 4]) {
    let i = surface.offset(x, y);
    if surface.has_alpha() {
        surface.data_mut()[i..i + 4].copy_from_slice(&rgba);
        return;
    }
    let alpha = rgba[3] as u32;
    let d = surface.data_mut();
    for c in 0..3 {
        let src = rgba[c] as u32;
        let dst = d[i + c] as u32;
        d[i + c] = ((src * alpha + dst * (255 - alpha) + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_frame(value: u8) -> Frame {
        Frame::new(vec![value; 2 * 2 * 3], 2, 2, 3, 0)
    }

    fn rgba_frame() -> Frame {
        Frame::new(vec![0; 2 * 2 * 4], 2, 2, 4, 0)
    }

    #[test]
    fn test_read_rgb() {
        let mut frame = rgb_frame(0);
        let i = frame.offset(1, 1);
        frame.data_mut()[i..i + 3].copy_from_slice(&[7, 8, 9]);
        assert_eq!(read_rgb(&frame, 1, 1), [7, 8, 9]);
    }

    #[test]
    fn test_write_opaque_sets_alpha_on_overlay() {
        let mut overlay = rgba_frame();
        write_opaque(&mut overlay, 0, 1, [1, 2, 3]);
        let i = overlay.offset(0, 1);
        assert_eq!(&overlay.data()[i..i + 4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_paint_opaque_replaces_rgb() {
        let mut frame = rgb_frame(100);
        paint(&mut frame, 0, 0, [0, 0, 0, 255]);
        assert_eq!(read_rgb(&frame, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_paint_translucent_blends_rgb() {
        let mut frame = rgb_frame(0);
        paint(&mut frame, 0, 0, [255, 0, 0, 128]);
        // 255 * 128 / 255 = 128
        assert_eq!(read_rgb(&frame, 0, 0), [128, 0, 0]);
    }

    #[test]
    fn test_paint_transparent_leaves_rgb() {
        let mut frame = rgb_frame(42);
        paint(&mut frame, 1, 1, [255, 255, 255, 0]);
        assert_eq!(read_rgb(&frame, 1, 1), [42, 42, 42]);
    }

    #[test]
    fn test_paint_overlay_stores_rgba() {
        let mut overlay = rgba_frame();
        paint(&mut overlay, 1, 0, [255, 0, 0, 128]);
        let i = overlay.offset(1, 0);
        assert_eq!(&overlay.data()[i..i + 4], &[255, 0, 0, 128]);
    }
}
