//! Point type and the three geometric predicates the classifier is built on.

use serde::{Deserialize, Serialize};

/// A 2D keypoint.  Normalized (`0.0–1.0`) straight from the detector, or
/// pixel-space after [`KeypointFrame::to_pixels`](crate::KeypointFrame::to_pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Truncate to whole pixels (the raster works in integer coordinates).
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

/// A finger counts as extended when its tip sits above its joint.
///
/// Image coordinates grow downward, so "above" means a smaller `y`.
pub fn is_extended(tip: Point, joint: Point) -> bool {
    tip.y < joint.y
}

/// Signed angle of the vector `from → to`, in degrees, range `(-180, 180]`.
pub fn angle_degrees(from: Point, to: Point) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

pub fn distance(a: Point, b: Point) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Point at parameter `t` along `start → end`.  Interpolates in `f64` so
/// segments spanning huge distances stay accurate near the canvas.
pub fn lerp(start: Point, end: Point, t: f64) -> Point {
    let along = |a: f32, b: f32| (a as f64 + (b as f64 - a as f64) * t) as f32;
    Point::new(along(start.x, end.x), along(start.y, end.y))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_means_tip_above_joint() {
        assert!(is_extended(Point::new(0.5, 0.2), Point::new(0.5, 0.4)));
        assert!(!is_extended(Point::new(0.5, 0.6), Point::new(0.5, 0.4)));
        // Level tip is not extended
        assert!(!is_extended(Point::new(0.5, 0.4), Point::new(0.1, 0.4)));
    }

    #[test]
    fn angle_quadrants() {
        let o = Point::new(0.0, 0.0);
        assert!((angle_degrees(o, Point::new(1.0, 0.0))).abs() < 1e-4);
        assert!((angle_degrees(o, Point::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((angle_degrees(o, Point::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
        assert!((angle_degrees(o, Point::new(0.0, -1.0)) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert!((d - 5.0).abs() < 1e-5);
        assert_eq!(distance(Point::new(2.0, 3.0), Point::new(2.0, 3.0)), 0.0);
    }

    #[test]
    fn to_pixel_truncates() {
        assert_eq!(Point::new(10.9, 3.2).to_pixel(), (10, 3));
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let (a, b) = (Point::new(-1e12, 4.0), Point::new(1e12, 8.0));
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Point::new(0.0, 6.0));
    }
}
