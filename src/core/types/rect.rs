//! Floor-plane rectangle type.

use serde::{Deserialize, Serialize};

use crate::core::types::Point2;

/// An axis-aligned rectangle on the floor plane, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect2 {
    /// Minimum x of the rectangle
    pub x: f32,
    /// Minimum y of the rectangle
    pub y: f32,
    /// Extent along x, non-negative
    pub width: f32,
    /// Extent along y, non-negative
    pub height: f32,
}

impl Rect2 {
    /// Creates a rectangle from its minimum corner and extents
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the point lies strictly inside the rectangle; points on
    /// the boundary are outside
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }

    /// Corner points in min/min, max/min, min/max, max/max order
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.x, self.y),
            Point2::new(self.x + self.width, self.y),
            Point2::new(self.x, self.y + self.height),
            Point2::new(self.x + self.width, self.y + self.height),
        ]
    }
}
