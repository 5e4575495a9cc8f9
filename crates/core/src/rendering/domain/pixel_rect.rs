use crate::shared::bounding_box::BoundingBox;

/// A box clipped to a frame, in unsigned pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl PixelRect {
    /// Intersection of `bbox` with a `width` x `height` frame.
    ///
    /// `None` for degenerate boxes and boxes entirely outside the frame.
    pub fn clip(bbox: &BoundingBox, width: u32, height: u32) -> Option<Self> {
        if bbox.is_degenerate() {
            return None;
        }
        let x1 = (bbox.x as i64).max(0);
        let y1 = (bbox.y as i64).max(0);
        let x2 = (bbox.x as i64 + bbox.width as i64).min(width as i64);
        let y2 = (bbox.y as i64 + bbox.height as i64).min(height as i64);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self {
            x: x1 as usize,
            y: y1 as usize,
            w: (x2 - x1) as usize,
            h: (y2 - y1) as usize,
        })
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.y..self.y + self.h
    }

    pub fn cols(&self) -> std::ops::Range<usize> {
        self.x..self.x + self.w
    }

    /// Whether `(x, y)` lies within `thickness` pixels of the rect's edge.
    pub fn on_border(&self, x: usize, y: usize, thickness: usize) -> bool {
        x < self.x + thickness
            || y < self.y + thickness
            || x + thickness >= self.x + self.w
            || y + thickness >= self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rect(x: usize, y: usize, w: usize, h: usize) -> PixelRect {
        PixelRect { x, y, w, h }
    }

    #[rstest]
    #[case::inside(BoundingBox::new(10, 10, 20, 20), Some(rect(10, 10, 20, 20)))]
    #[case::left_edge(BoundingBox::new(-5, 10, 20, 20), Some(rect(0, 10, 15, 20)))]
    #[case::bottom_right(BoundingBox::new(90, 95, 20, 20), Some(rect(90, 95, 10, 5)))]
    #[case::covers_frame(BoundingBox::new(-10, -10, 200, 200), Some(rect(0, 0, 100, 100)))]
    #[case::fully_outside(BoundingBox::new(150, 10, 20, 20), None)]
    #[case::fully_above(BoundingBox::new(10, -30, 20, 20), None)]
    #[case::zero_width(BoundingBox::new(10, 10, 0, 20), None)]
    #[case::negative_height(BoundingBox::new(10, 10, 20, -4), None)]
    fn test_clip(#[case] bbox: BoundingBox, #[case] expected: Option<PixelRect>) {
        assert_eq!(PixelRect::clip(&bbox, 100, 100), expected);
    }

    #[test]
    fn test_clip_extreme_coordinates_do_not_overflow() {
        let bbox = BoundingBox::new(i32::MAX - 1, 0, i32::MAX, 10);
        assert_eq!(PixelRect::clip(&bbox, 100, 100), None);
    }

    #[test]
    fn test_on_border() {
        let r = rect(10, 10, 10, 10);
        assert!(r.on_border(10, 15, 2));
        assert!(r.on_border(11, 15, 2));
        assert!(!r.on_border(12, 15, 2));
        assert!(r.on_border(18, 15, 2));
        assert!(r.on_border(15, 19, 2));
        assert!(!r.on_border(15, 15, 2));
    }
}
