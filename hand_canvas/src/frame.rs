//! One detected hand in one camera frame.

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::geometry::Point;

/// Number of landmarks the hand model produces.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices (MediaPipe hand model ordering).
pub mod landmark {
    pub const WRIST:        usize = 0;
    pub const THUMB_TIP:    usize = 4;
    pub const INDEX_JOINT:  usize = 6;
    pub const INDEX_TIP:    usize = 8;
    pub const MIDDLE_JOINT: usize = 10;
    pub const MIDDLE_TIP:   usize = 12;
    pub const RING_JOINT:   usize = 14;
    pub const RING_TIP:     usize = 16;
    pub const PINKY_JOINT:  usize = 18;
    pub const PINKY_TIP:    usize = 20;
}

/// The 21 keypoints of a single hand.  Always exactly [`LANDMARK_COUNT`]
/// points; a partial detection cannot be represented.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct KeypointFrame {
    points: [Point; LANDMARK_COUNT],
}

impl KeypointFrame {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        KeypointFrame { points }
    }

    /// Build from a detector's landmark list, rejecting any other count.
    pub fn from_slice(points: &[Point]) -> Result<Self, FrameError> {
        let points: [Point; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            FrameError::LandmarkCount { expected: LANDMARK_COUNT, actual: points.len() }
        })?;
        Ok(KeypointFrame { points })
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    pub fn wrist(&self)     -> Point { self.points[landmark::WRIST] }
    pub fn thumb_tip(&self) -> Point { self.points[landmark::THUMB_TIP] }
    pub fn index_tip(&self) -> Point { self.points[landmark::INDEX_TIP] }

    /// Scale normalized coordinates to a `width × height` pixel canvas.
    pub fn to_pixels(&self, width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        KeypointFrame { points: self.points.map(|p| Point::new(p.x * w, p.y * h)) }
    }

    /// Flip horizontally (`x → 1 - x`), for normalized frames from a
    /// selfie-view camera.
    pub fn mirrored(&self) -> Self {
        KeypointFrame { points: self.points.map(|p| Point::new(1.0 - p.x, p.y)) }
    }
}

impl TryFrom<Vec<Point>> for KeypointFrame {
    type Error = FrameError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        KeypointFrame::from_slice(&points)
    }
}

impl From<KeypointFrame> for Vec<Point> {
    fn from(frame: KeypointFrame) -> Self {
        frame.points.to_vec()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<Point> {
        (0..LANDMARK_COUNT).map(|i| Point::new(i as f32 / 40.0, 0.5)).collect()
    }

    #[test]
    fn from_slice_accepts_21() {
        let frame = KeypointFrame::from_slice(&ramp()).unwrap();
        assert_eq!(frame.index_tip(), Point::new(8.0 / 40.0, 0.5));
    }

    #[test]
    fn from_slice_rejects_partial_hand() {
        let err = KeypointFrame::from_slice(&ramp()[..20]).unwrap_err();
        assert_eq!(err, FrameError::LandmarkCount { expected: 21, actual: 20 });
    }

    #[test]
    fn to_pixels_scales_both_axes() {
        let frame = KeypointFrame::from_slice(&ramp()).unwrap().to_pixels(800, 600);
        assert_eq!(frame.wrist(), Point::new(0.0, 300.0));
        assert!((frame.point(20).x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn mirrored_flips_x_only() {
        let frame = KeypointFrame::from_slice(&ramp()).unwrap().mirrored();
        assert_eq!(frame.wrist(), Point::new(1.0, 0.5));
        assert!((frame.index_tip().x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn vec_conversion_checks_count() {
        assert!(KeypointFrame::try_from(ramp()).is_ok());
        let mut extra = ramp();
        extra.push(Point::default());
        assert!(KeypointFrame::try_from(extra).is_err());
    }
}
