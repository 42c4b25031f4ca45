//! Gesture classifier: one keypoint frame in, one label out.
//!
//! Stateless.  Rules are tried in a fixed order and the first match wins:
//!
//! | # | Fingers up | Fingers down | Label |
//! |---|---|---|---|
//! | 1 | index, middle | ring | `ShapeCircle` |
//! | 2 | index, pinky | middle | `ShapeRect` |
//! | 3 | index, middle | ring, pinky | `BrushDashed` |
//! | 4 | index, pinky | middle | `BrushSpray` |
//! | 5 | index | middle | `DrawPointer` |
//! | – | anything else | | `None` |
//!
//! Rule 3 is a strict subset of rule 1, and rule 4 repeats rule 2's test
//! exactly, so neither brush label can come out of [`classify`] as long as
//! this precedence holds.  The order is kept as-is; changing which gesture
//! selects which brush is a product decision, not a classifier fix.
//!
//! The thumb signal is separate: a thumb swung more than 120° away from the
//! wrist's +x axis marks the frame [`color_cycle_eligible`], whatever the
//! primary label is.

use crate::frame::{landmark, KeypointFrame};
use crate::geometry::{angle_degrees, is_extended, Point};

/// Thumb swing (degrees, absolute) beyond which the color-cycle signal fires.
pub const COLOR_CYCLE_ANGLE: f32 = 120.0;

/// A discrete gesture label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    #[default]
    None,
    DrawPointer,
    ShapeCircle,
    ShapeRect,
    BrushDashed,
    BrushSpray,
    /// The orthogonal thumb-rotation signal; see [`color_cycle_eligible`].
    ColorCycle,
}

impl GestureLabel {
    /// Short uppercase name for on-screen overlays.
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::None        => "NONE",
            GestureLabel::DrawPointer => "DRAW",
            GestureLabel::ShapeCircle => "CIRCLE",
            GestureLabel::ShapeRect   => "RECT",
            GestureLabel::BrushDashed => "DASHED",
            GestureLabel::BrushSpray  => "SPRAY",
            GestureLabel::ColorCycle  => "COLOR",
        }
    }
}

/// Everything the frame step needs from one hand frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    pub label:       GestureLabel,
    pub color_cycle: bool,
    /// Index fingertip, in whatever space the frame was in.
    pub index_tip:   Option<Point>,
}

impl HandReading {
    pub const ABSENT: HandReading = HandReading {
        label: GestureLabel::None,
        color_cycle: false,
        index_tip: None,
    };
}

struct Fingers {
    index:  bool,
    middle: bool,
    ring:   bool,
    pinky:  bool,
}

impl Fingers {
    fn of(frame: &KeypointFrame) -> Self {
        let up = |tip, joint| is_extended(frame.point(tip), frame.point(joint));
        Fingers {
            index:  up(landmark::INDEX_TIP,  landmark::INDEX_JOINT),
            middle: up(landmark::MIDDLE_TIP, landmark::MIDDLE_JOINT),
            ring:   up(landmark::RING_TIP,   landmark::RING_JOINT),
            pinky:  up(landmark::PINKY_TIP,  landmark::PINKY_JOINT),
        }
    }
}

/// Classify one frame.  No hand → [`GestureLabel::None`].
pub fn classify(frame: Option<&KeypointFrame>) -> GestureLabel {
    let Some(frame) = frame else { return GestureLabel::None };
    let f = Fingers::of(frame);

    if f.index && f.middle && !f.ring {
        GestureLabel::ShapeCircle
    } else if f.index && f.pinky && !f.middle {
        GestureLabel::ShapeRect
    } else if f.index && f.middle && !f.ring && !f.pinky {
        GestureLabel::BrushDashed
    } else if f.index && f.pinky && !f.middle {
        GestureLabel::BrushSpray
    } else if f.index && !f.middle {
        GestureLabel::DrawPointer
    } else {
        GestureLabel::None
    }
}

/// Thumb-rotation test.  Angles depend on aspect ratio, so pass a
/// pixel-space frame.
pub fn color_cycle_eligible(frame: Option<&KeypointFrame>) -> bool {
    frame.is_some_and(|f| angle_degrees(f.wrist(), f.thumb_tip()).abs() > COLOR_CYCLE_ANGLE)
}

pub fn read_frame(frame: Option<&KeypointFrame>) -> HandReading {
    match frame {
        None => HandReading::ABSENT,
        Some(f) => HandReading {
            label:       classify(Some(f)),
            color_cycle: color_cycle_eligible(Some(f)),
            index_tip:   Some(f.index_tip()),
        },
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::HandPose;

    fn label_of(pose: HandPose) -> GestureLabel {
        let frame = pose.at(Point::new(0.5, 0.3)).to_pixels(800, 600);
        classify(Some(&frame))
    }

    #[test]
    fn no_hand_is_none() {
        assert_eq!(classify(None), GestureLabel::None);
        assert_eq!(read_frame(None), HandReading::ABSENT);
    }

    #[test]
    fn index_only_is_pointer() {
        assert_eq!(label_of(HandPose::POINTER), GestureLabel::DrawPointer);
        // Ring or pinky up doesn't matter for rule 5 when middle is down
        // and no earlier rule matches.
        assert_eq!(label_of(HandPose::fingers(true, false, true, false)), GestureLabel::DrawPointer);
    }

    #[test]
    fn peace_is_circle() {
        assert_eq!(label_of(HandPose::CIRCLE), GestureLabel::ShapeCircle);
        // Pinky up too still satisfies rule 1
        assert_eq!(label_of(HandPose::fingers(true, true, false, true)), GestureLabel::ShapeCircle);
    }

    #[test]
    fn rock_is_rect_never_spray() {
        assert_eq!(label_of(HandPose::RECT), GestureLabel::ShapeRect);
        assert_eq!(label_of(HandPose::fingers(true, false, true, true)), GestureLabel::ShapeRect);
    }

    #[test]
    fn dashed_condition_shadowed_by_circle() {
        // Satisfies rule 3 exactly, but rule 1 comes first.
        let pose = HandPose::fingers(true, true, false, false);
        assert_eq!(label_of(pose), GestureLabel::ShapeCircle);
    }

    #[test]
    fn other_patterns_are_none() {
        assert_eq!(label_of(HandPose::FIST), GestureLabel::None);
        assert_eq!(label_of(HandPose::OPEN), GestureLabel::None);
        assert_eq!(label_of(HandPose::fingers(false, true, false, false)), GestureLabel::None);
    }

    #[test]
    fn thumb_rotation_is_orthogonal() {
        let frame = HandPose::POINTER.with_thumb_rotated()
            .at(Point::new(0.5, 0.3))
            .to_pixels(800, 600);
        let r = read_frame(Some(&frame));
        assert_eq!(r.label, GestureLabel::DrawPointer);
        assert!(r.color_cycle);

        let rest = HandPose::POINTER.at(Point::new(0.5, 0.3)).to_pixels(800, 600);
        assert!(!color_cycle_eligible(Some(&rest)));
    }

    #[test]
    fn reading_carries_index_tip() {
        let frame = HandPose::POINTER.at(Point::new(0.25, 0.5)).to_pixels(800, 600);
        let r = read_frame(Some(&frame));
        assert_eq!(r.index_tip, Some(Point::new(200.0, 300.0)));
    }
}
