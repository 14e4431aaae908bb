//! Shared geometry types: points, coordinate sets and viewport state.

use serde::{Deserialize, Serialize};

/// An integer point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Bounding geometry of an element, either relative to the viewport or to the
/// whole page.
///
/// Every field is required; the parser never produces a partially filled set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateSet {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub center: Point,
    pub width: i64,
    pub height: i64,
}

impl CoordinateSet {
    /// Check if a point lies inside the box spanned by the corners.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// Get the center point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Check if any part of the box is inside the given viewport.
    ///
    /// Only meaningful for viewport-relative sets.
    pub fn intersects_viewport(&self, viewport: &ViewportInfo) -> bool {
        self.bottom_right.x > 0
            && self.bottom_right.y > 0
            && self.top_left.x < viewport.width
            && self.top_left.y < viewport.height
    }
}

/// Scroll and size of the page viewport at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportInfo {
    pub scroll_x: i64,
    pub scroll_y: i64,
    pub width: i64,
    pub height: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i64, y: i64, side: i64) -> CoordinateSet {
        CoordinateSet {
            top_left: Point::new(x, y),
            top_right: Point::new(x + side, y),
            bottom_left: Point::new(x, y + side),
            bottom_right: Point::new(x + side, y + side),
            center: Point::new(x + side / 2, y + side / 2),
            width: side,
            height: side,
        }
    }

    #[test]
    fn test_coordinate_set_contains() {
        let coords = square(10, 20, 100);
        assert!(coords.contains(Point::new(50, 40)));
        assert!(coords.contains(Point::new(10, 20)));
        assert!(!coords.contains(Point::new(0, 0)));
        assert!(!coords.contains(Point::new(200, 40)));
    }

    #[test]
    fn test_coordinate_set_center() {
        let coords = square(0, 0, 100);
        assert_eq!(coords.center(), Point::new(50, 50));
    }

    #[test]
    fn test_intersects_viewport() {
        let viewport = ViewportInfo {
            scroll_x: 0,
            scroll_y: 0,
            width: 1280,
            height: 720,
        };
        assert!(square(100, 100, 50).intersects_viewport(&viewport));
        assert!(square(-20, -20, 50).intersects_viewport(&viewport));
        assert!(!square(100, 900, 50).intersects_viewport(&viewport));
        assert!(!square(-100, 10, 50).intersects_viewport(&viewport));
    }
}
