//! Hold-to-confirm state machine.
//!
//! A gesture has to be held continuously for [`HOLD_DURATION`] before its
//! action is committed.  One machine runs per [`HoldCategory`]; each only
//! reacts to the labels of its own category and treats every other label
//! (including `None`) as "hand moved on", cancelling the hold.
//!
//! ```text
//!            tracked L                  held ≥ 1 s
//!   Idle ───────────────▶ Pending(L) ───────────────▶ Latched(L)
//!    ▲                      │   ▲   (emits Confirmed)     │
//!    │     untracked        │   │ tracked L' ≠ L          │ tracked L' ≠ L
//!    └──────────────────────┘   └─────────────────────────┘
//! ```
//!
//! `Latched` keeps a held gesture from firing again; the label has to change
//! before the same action is available.

use std::time::{Duration, Instant};

use crate::classifier::GestureLabel;

/// How long a gesture must be held before it is confirmed.
pub const HOLD_DURATION: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoldCategory {
    /// Shape stamps: circle, rectangle.
    Tool,
    /// Brush style changes: dashed, spray.
    Brush,
}

impl HoldCategory {
    pub fn tracks(self, label: GestureLabel) -> bool {
        match self {
            HoldCategory::Tool  => matches!(label, GestureLabel::ShapeCircle | GestureLabel::ShapeRect),
            HoldCategory::Brush => matches!(label, GestureLabel::BrushDashed | GestureLabel::BrushSpray),
        }
    }

    /// Overlay prefix shown while a hold is pending.
    pub fn caption(self) -> &'static str {
        match self {
            HoldCategory::Tool  => "HOLD",
            HoldCategory::Brush => "BRUSH",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoldState {
    Idle,
    Pending { label: GestureLabel, since: Instant },
    Latched { label: GestureLabel },
}

/// What one frame did to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldStep {
    /// Nothing tracked is being held.
    Idle,
    /// `label` is being held but hasn't reached the threshold yet.
    Previewing(GestureLabel),
    /// `label` was just confirmed; act on it now.
    Confirmed(GestureLabel),
    /// `label` is still held after it already fired.
    Latched(GestureLabel),
}

#[derive(Clone, Debug)]
pub struct HoldMachine {
    category: HoldCategory,
    state:    HoldState,
}

impl HoldMachine {
    pub fn new(category: HoldCategory) -> Self {
        HoldMachine { category, state: HoldState::Idle }
    }

    /// Label currently pending confirmation, if any.
    pub fn pending(&self) -> Option<GestureLabel> {
        match self.state {
            HoldState::Pending { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Advance one frame with this frame's label and timestamp.
    pub fn step(&mut self, label: GestureLabel, now: Instant) -> HoldStep {
        if !self.category.tracks(label) {
            self.state = HoldState::Idle;
            return HoldStep::Idle;
        }

        match self.state {
            HoldState::Pending { label: held, since } if held == label => {
                if now.saturating_duration_since(since) >= HOLD_DURATION {
                    self.state = HoldState::Latched { label };
                    HoldStep::Confirmed(label)
                } else {
                    HoldStep::Previewing(label)
                }
            }
            HoldState::Latched { label: held } if held == label => HoldStep::Latched(label),
            // Idle, or a different tracked label: (re)start the hold.
            _ => {
                self.state = HoldState::Pending { label, since: now };
                HoldStep::Previewing(label)
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use GestureLabel::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    /// Feed `(label, offset_ms)` pairs; return every confirmed label.
    fn run(machine: &mut HoldMachine, t0: Instant, feed: &[(GestureLabel, u64)]) -> Vec<GestureLabel> {
        feed.iter()
            .filter_map(|&(l, t)| match machine.step(l, t0 + ms(t)) {
                HoldStep::Confirmed(c) => Some(c),
                _ => Option::None,
            })
            .collect()
    }

    #[test]
    fn first_tracked_frame_previews() {
        let mut m = HoldMachine::new(HoldCategory::Tool);
        assert_eq!(m.step(ShapeCircle, Instant::now()), HoldStep::Previewing(ShapeCircle));
        assert_eq!(m.pending(), Some(ShapeCircle));
    }

    #[test]
    fn never_fires_before_threshold() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Tool);
        let fired = run(&mut m, t0, &[(ShapeRect, 0), (ShapeRect, 500), (ShapeRect, 990), (None, 1000)]);
        assert!(fired.is_empty());
        assert_eq!(m.pending(), Option::None);
    }

    #[test]
    fn fires_once_at_threshold() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Tool);
        let fired = run(&mut m, t0, &[(ShapeCircle, 0), (ShapeCircle, 600), (ShapeCircle, 1000)]);
        assert_eq!(fired, vec![ShapeCircle]);
    }

    #[test]
    fn no_repeat_while_still_held() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Tool);
        let feed: Vec<_> = (0..=40).map(|i| (ShapeCircle, i * 100)).collect();
        assert_eq!(run(&mut m, t0, &feed), vec![ShapeCircle]);
    }

    #[test]
    fn fires_again_after_release_and_rehold() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Tool);
        let fired = run(&mut m, t0, &[
            (ShapeCircle, 0), (ShapeCircle, 1000),       // fires
            (ShapeCircle, 1500),                         // latched
            (DrawPointer, 1600),                         // released
            (ShapeCircle, 1700), (ShapeCircle, 2700),    // fires again
        ]);
        assert_eq!(fired, vec![ShapeCircle, ShapeCircle]);
    }

    #[test]
    fn switching_label_restarts_hold() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Tool);
        let fired = run(&mut m, t0, &[
            (ShapeCircle, 0), (ShapeCircle, 800),
            (ShapeRect, 900),                            // restart at 900
            (ShapeRect, 1800),                           // only 900ms held
            (ShapeRect, 1900),
        ]);
        assert_eq!(fired, vec![ShapeRect]);
    }

    #[test]
    fn latched_label_switch_starts_new_hold() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Brush);
        let fired = run(&mut m, t0, &[
            (BrushDashed, 0), (BrushDashed, 1000),
            (BrushSpray, 1100), (BrushSpray, 2100),
        ]);
        assert_eq!(fired, vec![BrushDashed, BrushSpray]);
    }

    #[test]
    fn other_category_cancels() {
        let t0 = Instant::now();
        let mut m = HoldMachine::new(HoldCategory::Brush);
        m.step(BrushSpray, t0);
        assert_eq!(m.step(ShapeCircle, t0 + ms(500)), HoldStep::Idle);
        // Resuming must start from scratch
        assert_eq!(m.step(BrushSpray, t0 + ms(1200)), HoldStep::Previewing(BrushSpray));
    }

    #[test]
    fn categories_track_their_own_labels() {
        assert!(HoldCategory::Tool.tracks(ShapeRect));
        assert!(!HoldCategory::Tool.tracks(BrushDashed));
        assert!(HoldCategory::Brush.tracks(BrushSpray));
        assert!(!HoldCategory::Brush.tracks(DrawPointer));
        assert!(!HoldCategory::Brush.tracks(ColorCycle));
    }
}
