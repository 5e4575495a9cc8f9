/// Axis-aligned detection box in frame pixel coordinates.
///
/// `x`/`y` may be negative or lie past the frame edge; `width`/`height`
/// are non-negative by detector contract but are never validated here.
/// Clipping is the renderer's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a box from corner coordinates, truncating toward zero.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let x = x1 as i32;
        let y = y1 as i32;
        Self {
            x,
            y,
            width: x2 as i32 - x,
            height: y2 as i32 - y,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether this (new) detection continues `existing`.
    ///
    /// Both center offsets must be strictly below half of *this* box's
    /// size. The existing box's size plays no part, so the relation is
    /// not symmetric.
    pub fn matches(&self, existing: &BoundingBox) -> bool {
        let (cx, cy) = self.center();
        let (ex, ey) = existing.center();
        (cx - ex).abs() < self.width as f64 / 2.0 && (cy - ey).abs() < self.height as f64 / 2.0
    }

    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let union = self.area() as f64 + other.area() as f64 - inter;
        inter / union
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}
