//! # gesture_draw
//!
//! Webcam finger-painting: an external hand-landmark detector feeds the
//! [`hand_canvas`] session, and a `minifb` window shows the canvas with its
//! overlays.
//!
//! ## Landmark sources
//!
//! * `detector` (default): spawns a detector process that prints `READY`,
//!   then one JSON line of landmarks per camera frame.  See [`perception`].
//! * `replay`: reads the same JSON lines from a file.
//! * `sim`: simulation mode, mouse and keyboard stand in for the hand.
//!
//! ### Keyboard shortcuts
//!
//! | Key | Action |
//! |---|---|
//! | `C` | Clear the canvas |
//! | `S` | Save `drawing_<unix>.png` |
//! | `T` | Toggle thin / thick brush |
//! | `B` | Next brush style |
//! | `Q` / `Escape` | Quit |
//!
//! ### Simulation controls
//!
//! | Input | Pose |
//! |---|---|
//! | Mouse position | Index fingertip |
//! | Left button held | Pointer (draw) |
//! | `1` held | Circle stamp |
//! | `2` held | Rectangle stamp |
//! | `R` held | Thumb swung out (color cycle) |

pub mod app;
pub mod error;
pub mod perception;
pub mod snapshot;
pub mod visualizer;

pub use error::AppError;
