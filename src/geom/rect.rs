use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in a 2D space with a top-left origin (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Point containment, inclusive of the top/left edges and exclusive of
    /// the bottom/right ones so that adjacent rooms never both claim a point.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Checks whether the rectangle lies within `[0, width] × [0, height]`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.x >= 0.
            && self.y >= 0.
            && self.width >= 0.
            && self.height >= 0.
            && self.x + self.width <= width
            && self.y + self.height <= height
    }
}
