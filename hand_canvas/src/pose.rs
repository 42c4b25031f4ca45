//! Synthetic hand poses.
//!
//! Builds a plausible 21-landmark frame from a finger-extension pattern, so
//! the classifier can be driven without a camera: the mouse/keyboard
//! simulator uses it at runtime and the tests use it everywhere.

use crate::frame::{KeypointFrame, LANDMARK_COUNT};
use crate::geometry::Point;

// Normalized offsets.  The resting thumb points straight up from the wrist
// (-90°) so it stays clear of the 120° color-cycle threshold whether or not
// the frame is mirrored.
const FINGER_SPACING: f32 = 0.03;
const JOINT_DROP:     f32 = 0.08;
const CURL_DROP:      f32 = 0.04;
const WRIST_DROP:     f32 = 0.30;
const THUMB_REST:     Point = Point::new(0.0, -0.15);
const THUMB_ROTATED:  Point = Point::new(-0.15, 0.02);

/// Which fingers are up, and whether the thumb is swung out past the
/// wrist (the color-cycle gesture).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandPose {
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
    pub thumb_rotated: bool,
}

impl HandPose {
    pub const FIST:    HandPose = HandPose::fingers(false, false, false, false);
    pub const POINTER: HandPose = HandPose::fingers(true,  false, false, false);
    /// Index + middle ("peace").
    pub const CIRCLE:  HandPose = HandPose::fingers(true,  true,  false, false);
    /// Index + pinky ("rock").
    pub const RECT:    HandPose = HandPose::fingers(true,  false, false, true);
    pub const OPEN:    HandPose = HandPose::fingers(true,  true,  true,  true);

    pub const fn fingers(index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        HandPose { index, middle, ring, pinky, thumb_rotated: false }
    }

    pub const fn with_thumb_rotated(mut self) -> Self {
        self.thumb_rotated = true;
        self
    }

    /// Lay the hand out so the index finger's second joint sits just below
    /// `anchor` (normalized coordinates).  With the index extended its tip
    /// lands exactly on `anchor`.
    pub fn at(self, anchor: Point) -> KeypointFrame {
        let wrist = Point::new(anchor.x, anchor.y + WRIST_DROP);
        let mut points = [wrist; LANDMARK_COUNT];

        // Thumb: 1..=4 interpolated from the wrist out to the tip.
        let thumb = if self.thumb_rotated { THUMB_ROTATED } else { THUMB_REST };
        for k in 1..=4 {
            let t = k as f32 / 4.0;
            points[k] = Point::new(wrist.x + thumb.x * t, wrist.y + thumb.y * t);
        }

        // Fingers: [mcp, pip, dip, tip] at 5.., 9.., 13.., 17..
        let extended = [self.index, self.middle, self.ring, self.pinky];
        for (f, &up) in extended.iter().enumerate() {
            let x     = anchor.x + FINGER_SPACING * f as f32;
            let joint = Point::new(x, anchor.y + JOINT_DROP);
            let tip   = if up {
                Point::new(x, anchor.y)
            } else {
                Point::new(x, joint.y + CURL_DROP)
            };
            let base = 5 + f * 4;
            points[base]     = Point::new(x, wrist.y - 0.10);
            points[base + 1] = joint;
            points[base + 2] = Point::new(x, (joint.y + tip.y) / 2.0);
            points[base + 3] = tip;
        }

        KeypointFrame::new(points)
    }
}
