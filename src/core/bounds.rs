use crate::core::geo::Point;
use crate::core::size::Size;
use serde::{Deserialize, Serialize};

/// Represents a rectangle in pixel coordinates (y grows downward).
///
/// Used both for the visible backbuffer rectangle supplied by the host and
/// for the draw rectangles computed from a geometry's anchor, alignment and
/// zoom-scaled size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from a top-left corner and a size
    pub fn from_top_left_and_size(top_left: Point, size: Size) -> Self {
        Self::new(
            top_left,
            Point::new(top_left.x + size.width, top_left.y + size.height),
        )
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the size of the bounds
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Gets the top-left corner (pixel space, y down)
    pub fn top_left(&self) -> Point {
        self.min
    }

    /// Gets the top-right corner (pixel space, y down)
    pub fn top_right(&self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    /// Gets the bottom-right corner (pixel space, y down)
    pub fn bottom_right(&self) -> Point {
        self.max
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Checks if the bounds are valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}
