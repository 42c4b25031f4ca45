//! Drawing session: all mutable state, advanced one frame at a time.
//!
//! [`Session::step`] is the whole per-frame pipeline:
//!
//! ```text
//! user commands ─┐
//!                ├─▶ color cycle ─▶ hold machines ─▶ pen path ─▶ StepOutcome
//! hand frame ────┘     (thumb)      (stamps/brush)    (strokes)
//! ```
//!
//! The session never touches a window or a file.  Things the front end has
//! to do (show an overlay, write a PNG) come back as [`RenderCommand`]s.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::canvas::{Canvas, CANVAS_H, CANVAS_W};
use crate::classifier::{read_frame, GestureLabel};
use crate::color_cycle::{next_color, ColorCycle, PALETTE};
use crate::frame::KeypointFrame;
use crate::geometry::Point;
use crate::hold::{HoldCategory, HoldMachine, HoldStep};
use crate::stroke::{render_segment, BrushStyle, Thickness};

/// Radius of the circle stamp.
pub const CIRCLE_RADIUS: i32 = 30;
/// Size of the rectangle stamp, centered on the fingertip.
pub const RECT_W: i32 = 60;
pub const RECT_H: i32 = 40;

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub width:  usize,
    pub height: usize,
    /// Start with the thick brush.
    pub thick:  bool,
    pub brush:  BrushStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            width:  CANVAS_W,
            height: CANVAS_H,
            thick:  false,
            brush:  BrushStyle::Solid,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Step inputs / outputs
// ════════════════════════════════════════════════════════════════════════════

/// Discrete commands from the keyboard (or any other front end).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserCommand {
    Clear,
    Save,
    ToggleThick,
    /// Step Solid → Dashed → Spray without a gesture.
    CycleBrush,
    Quit,
}

/// One frame's worth of input.  `frame` must already be in canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub commands: &'a [UserCommand],
    pub frame:    Option<&'a KeypointFrame>,
    pub now:      Instant,
}

/// Presentation work for the front end.  Never drawn into the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// "Hold to confirm" overlay for a pending gesture.
    HoldPreview { category: HoldCategory, label: GestureLabel },
    /// Active color indicator.
    Swatch(u32),
    /// Detected hand, for a skeleton overlay.
    Landmarks(KeypointFrame),
    /// Write the canvas to disk.
    SaveCanvas,
}

/// State changes that happened this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Stroke { from: Point, to: Point, style: BrushStyle },
    Stamped { shape: GestureLabel, at: Point },
    BrushChanged(BrushStyle),
    ColorChanged(u32),
    ThicknessChanged(Thickness),
    Cleared,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub commands: Vec<RenderCommand>,
    pub events:   Vec<SessionEvent>,
    pub quit:     bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session {
    canvas:      Canvas,
    color_index: usize,
    brush:       BrushStyle,
    thickness:   Thickness,
    last_pen:    Option<Point>,

    tool_hold:   HoldMachine,
    brush_hold:  HoldMachine,
    color_cycle: ColorCycle,

    rng:         StdRng,
}

impl Session {
    /// Production session; spray jitter seeded from OS entropy.
    pub fn new(cfg: SessionConfig) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    /// Deterministic spray output, for tests and replays.
    pub fn with_seed(cfg: SessionConfig, seed: u64) -> Self {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: SessionConfig, rng: StdRng) -> Self {
        Session {
            canvas:      Canvas::new(cfg.width, cfg.height),
            color_index: 0,
            brush:       cfg.brush,
            thickness:   if cfg.thick { Thickness::Thick } else { Thickness::Thin },
            last_pen:    None,
            tool_hold:   HoldMachine::new(HoldCategory::Tool),
            brush_hold:  HoldMachine::new(HoldCategory::Brush),
            color_cycle: ColorCycle::new(),
            rng,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn canvas(&self)       -> &Canvas       { &self.canvas }
    pub fn active_color(&self) -> u32           { PALETTE[self.color_index] }
    pub fn color_index(&self)  -> usize         { self.color_index }
    pub fn brush(&self)        -> BrushStyle    { self.brush }
    pub fn thickness(&self)    -> Thickness     { self.thickness }
    pub fn last_pen(&self)     -> Option<Point> { self.last_pen }

    // ── Per-frame step ────────────────────────────────────────────────────

    pub fn step(&mut self, input: FrameInput<'_>) -> StepOutcome {
        let mut out = StepOutcome::default();

        // ── 1. user commands ──────────────────────────────────────────────
        for &cmd in input.commands {
            match cmd {
                UserCommand::Clear => {
                    self.canvas.clear();
                    self.last_pen = None;
                    info!("canvas cleared");
                    out.events.push(SessionEvent::Cleared);
                }
                UserCommand::Save => out.commands.push(RenderCommand::SaveCanvas),
                UserCommand::ToggleThick => {
                    self.thickness = self.thickness.toggled();
                    debug!(px = self.thickness.pixels(), "brush thickness");
                    out.events.push(SessionEvent::ThicknessChanged(self.thickness));
                }
                UserCommand::CycleBrush => {
                    self.brush = self.brush.next();
                    debug!(brush = self.brush.as_str(), "brush cycled");
                    out.events.push(SessionEvent::BrushChanged(self.brush));
                }
                UserCommand::Quit => out.quit = true,
            }
        }
        if out.quit {
            return out;
        }

        let reading = read_frame(input.frame);

        // ── 2. color cycle (thumb rotation) ───────────────────────────────
        if self.color_cycle.tick(reading.color_cycle) {
            self.color_index = next_color(self.color_index);
            debug!(color = %format!("{:#010X}", self.active_color()), "color advanced");
            out.events.push(SessionEvent::ColorChanged(self.active_color()));
        }

        // ── 3. hold-to-confirm: shapes, then brush styles ─────────────────
        let tool_step  = self.tool_hold.step(reading.label, input.now);
        let brush_step = self.brush_hold.step(reading.label, input.now);
        for (category, hold) in [(HoldCategory::Tool, tool_step), (HoldCategory::Brush, brush_step)] {
            match hold {
                HoldStep::Previewing(label) => {
                    out.commands.push(RenderCommand::HoldPreview { category, label });
                }
                HoldStep::Confirmed(label) => self.confirm(label, reading.index_tip, &mut out),
                HoldStep::Idle | HoldStep::Latched(_) => {}
            }
        }

        // ── 4. pen path ───────────────────────────────────────────────────
        match (reading.label, reading.index_tip) {
            (GestureLabel::DrawPointer, Some(tip)) => {
                if let Some(from) = self.last_pen {
                    let color = self.active_color();
                    render_segment(
                        &mut self.canvas,
                        color,
                        from,
                        tip,
                        self.thickness.pixels(),
                        self.brush,
                        &mut self.rng,
                    );
                    trace!(?from, to = ?tip, brush = self.brush.as_str(), "stroke");
                    out.events.push(SessionEvent::Stroke { from, to: tip, style: self.brush });
                }
                self.last_pen = Some(tip);
            }
            _ => self.last_pen = None,
        }

        // ── 5. overlays ───────────────────────────────────────────────────
        out.commands.push(RenderCommand::Swatch(self.active_color()));
        if let Some(frame) = input.frame {
            out.commands.push(RenderCommand::Landmarks(frame.clone()));
        }

        out
    }

    fn confirm(&mut self, label: GestureLabel, tip: Option<Point>, out: &mut StepOutcome) {
        let color = self.active_color();
        match label {
            GestureLabel::ShapeCircle | GestureLabel::ShapeRect => {
                let Some(at) = tip else { return };
                let (x, y) = at.to_pixel();
                if label == GestureLabel::ShapeCircle {
                    self.canvas.fill_circle(x, y, CIRCLE_RADIUS, color);
                } else {
                    self.canvas.fill_rect(
                        x.saturating_sub(RECT_W / 2),
                        y.saturating_sub(RECT_H / 2),
                        RECT_W,
                        RECT_H,
                        color,
                    );
                }
                debug!(shape = label.as_str(), x, y, "stamp confirmed");
                out.events.push(SessionEvent::Stamped { shape: label, at });
            }
            GestureLabel::BrushDashed | GestureLabel::BrushSpray => {
                self.brush = if label == GestureLabel::BrushDashed {
                    BrushStyle::Dashed
                } else {
                    BrushStyle::Spray
                };
                debug!(brush = self.brush.as_str(), "brush confirmed");
                out.events.push(SessionEvent::BrushChanged(self.brush));
            }
            _ => {}
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
