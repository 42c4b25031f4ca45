//! # hand_canvas
//!
//! The camera-free core of a gesture-driven drawing app: turns one hand's
//! 21 landmarks per frame into strokes, stamps, brush changes and color
//! changes on a persistent 800×600 raster.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Confirmation | Action |
//! |---|---|---|
//! | Index up, middle down | none (continuous) | Draw with the active brush |
//! | Index + middle up, ring down | hold 1 s | Stamp filled circle, r = 30 |
//! | Index + pinky up, middle down | hold 1 s | Stamp filled 60×40 rectangle |
//! | Index + middle up, ring + pinky down | hold 1 s | Brush → dashed *(shadowed by circle)* |
//! | Index + pinky up, middle down | hold 1 s | Brush → spray *(shadowed by rectangle)* |
//! | Thumb swung > 120° from wrist | 30-frame cooldown | Next palette color |
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Instant;
//! use hand_canvas::{FrameInput, HandPose, Point, Session, SessionConfig};
//!
//! let mut session = Session::with_seed(SessionConfig::default(), 1);
//! let now = Instant::now();
//! for x in [0.25, 0.5] {
//!     let hand = HandPose::POINTER.at(Point::new(x, 0.5)).to_pixels(800, 600);
//!     session.step(FrameInput { commands: &[], frame: Some(&hand), now });
//! }
//! assert!(session.canvas().count_color(session.active_color()) > 0);
//! ```

pub mod canvas;
pub mod classifier;
pub mod color_cycle;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod hold;
pub mod pose;
pub mod session;
pub mod stroke;

pub use canvas::{Canvas, BACKGROUND, CANVAS_H, CANVAS_W};
pub use classifier::{classify, color_cycle_eligible, read_frame, GestureLabel, HandReading};
pub use color_cycle::{ColorCycle, PALETTE};
pub use error::FrameError;
pub use frame::{landmark, KeypointFrame, LANDMARK_COUNT};
pub use geometry::{angle_degrees, distance, is_extended, lerp, Point};
pub use hold::{HoldCategory, HoldMachine, HoldStep, HOLD_DURATION};
pub use pose::HandPose;
pub use session::{
    FrameInput, RenderCommand, Session, SessionConfig, SessionEvent, StepOutcome, UserCommand,
};
pub use stroke::{render_segment, BrushStyle, Thickness};
