//! Hand landmark sources: an external detector process, a recorded replay,
//! or a mouse/keyboard simulation.
//!
//! The public interface is [`LandmarkSource`].  The frame loop doesn't need
//! to know whether frames come from a camera or the simulator.
//!
//! ## Detector protocol
//!
//! The detector owns the camera and the hand model.  It prints `READY` once,
//! then one JSON object per camera frame:
//!
//! ```text
//! {"hands":[{"score":0.93,"landmarks":[{"x":0.41,"y":0.62,"z":-0.01}, … 21 …]}],"error":null}
//! ```
//!
//! Coordinates are normalized to `0.0–1.0` in the camera's own image, not
//! flipped.  The app mirrors camera frames into a selfie view unless run
//! with `--no-mirror`, so a detector that already flips its image should be
//! paired with that flag.  Replay files use the same line format without
//! the `READY` handshake.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use clap::ValueEnum;
use hand_canvas::{HandPose, KeypointFrame, Point};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait: unified interface for camera, replay and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver one (optional) hand per frame.
pub trait LandmarkSource {
    /// Block until the next frame.  `Ok(None)` means no hand this frame;
    /// `Err` means the source is finished.
    fn next_frame(&mut self) -> Result<Option<KeypointFrame>, AppError>;

    /// Window input for this frame.  Only the simulator cares.
    fn feed(&mut self, _input: &SimInput) {}

    fn name(&self) -> &'static str;

    /// Frames come from a camera image (and so may need mirroring).
    fn is_camera(&self) -> bool { true }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// External hand-landmark detector process (camera).
    Detector,
    /// Recorded JSON-lines file.
    Replay,
    /// Mouse and keyboard, no camera.
    Sim,
}

// ════════════════════════════════════════════════════════════════════════════
// Detection JSON
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

fn full_confidence() -> f32 { 1.0 }

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default = "full_confidence")]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionLine {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one detector line into the first confident, complete hand.
///
/// Anything unusable (bad JSON, detector-side error, low score, wrong
/// landmark count) is logged and treated as "no hand".
pub fn parse_detection(line: &str, min_confidence: f32) -> Option<KeypointFrame> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let result: DetectionLine = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unparseable detection line");
            return None;
        }
    };

    if let Some(error) = result.error {
        warn!(%error, "detector reported an error");
        return None;
    }

    for hand in result.hands {
        if hand.score < min_confidence {
            debug!(score = hand.score, "hand below confidence threshold");
            continue;
        }
        let points: Vec<Point> = hand.landmarks.iter().map(|l| Point::new(l.x, l.y)).collect();
        match KeypointFrame::from_slice(&points) {
            Ok(frame) => return Some(frame),
            Err(e) => warn!(error = %e, "dropping incomplete hand"),
        }
    }
    None
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorProcess: external camera + model
// ════════════════════════════════════════════════════════════════════════════

/// Hand detector running as a child process.
///
/// The child holds the camera, so dropping this kills and reaps it on
/// every exit path.
pub struct DetectorProcess {
    child:          Child,
    reader:         BufReader<ChildStdout>,
    min_confidence: f32,
}

impl DetectorProcess {
    /// Start `command[0]` with `command[1..]` and wait for its `READY` line.
    pub fn spawn(command: &[String], min_confidence: f32) -> Result<Self, AppError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| AppError::PerceptionUnavailable("no detector command given".into()))?;

        info!(%program, ?args, "starting hand detector");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AppError::PerceptionUnavailable(format!("{program}: {e}")))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::PerceptionUnavailable("detector stdout not captured".into()));
        };

        // From here on Drop cleans up the child.
        let mut detector = DetectorProcess {
            child,
            reader: BufReader::new(stdout),
            min_confidence,
        };

        let mut ready = String::new();
        detector
            .reader
            .read_line(&mut ready)
            .map_err(|e| AppError::PerceptionUnavailable(e.to_string()))?;
        if ready.trim() != "READY" {
            return Err(AppError::PerceptionUnavailable(format!(
                "detector did not signal READY, got {:?}",
                ready.trim()
            )));
        }

        info!("hand detector ready");
        Ok(detector)
    }
}

impl LandmarkSource for DetectorProcess {
    fn next_frame(&mut self) -> Result<Option<KeypointFrame>, AppError> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0)  => Err(AppError::FrameRead("detector closed its output".into())),
            Ok(_)  => Ok(parse_detection(&line, self.min_confidence)),
            Err(e) => Err(AppError::FrameRead(e.to_string())),
        }
    }

    fn name(&self) -> &'static str { "detector" }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        info!("hand detector stopped");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource: recorded detector output
// ════════════════════════════════════════════════════════════════════════════

pub struct ReplaySource<R> {
    reader:         R,
    min_confidence: f32,
    line:           usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path, min_confidence: f32) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::PerceptionUnavailable(format!("{}: {e}", path.display()))
        })?;
        info!(path = %path.display(), "replaying recorded landmarks");
        Ok(Self::from_reader(BufReader::new(file), min_confidence))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R, min_confidence: f32) -> Self {
        ReplaySource { reader, min_confidence, line: 0 }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<KeypointFrame>, AppError> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => Err(AppError::FrameRead(format!("replay ended after {} frames", self.line))),
            Ok(_) => {
                self.line += 1;
                Ok(parse_detection(&buf, self.min_confidence))
            }
            Err(e) => Err(AppError::FrameRead(e.to_string())),
        }
    }

    fn name(&self) -> &'static str { "replay" }
}

// ════════════════════════════════════════════════════════════════════════════
// SimulatedHand: mouse/keyboard (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw window state the simulator turns into a hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimInput {
    /// Mouse position, normalized to the window.  `None` = outside.
    pub pointer: Option<(f32, f32)>,
    /// Left mouse button.
    pub drawing: bool,
    /// Key `1`.
    pub circle:  bool,
    /// Key `2`.
    pub rect:    bool,
    /// Key `R`.
    pub rotate_thumb: bool,
}

/// Gesture source driven by [`SimInput`] from the window.
///
/// The mouse places the index fingertip; the button and keys pick a pose.
/// With nothing pressed the hand is shown as a fist (visible, no gesture).
#[derive(Debug, Default)]
pub struct SimulatedHand {
    input: SimInput,
}

impl SimulatedHand {
    pub fn new() -> Self { Self::default() }

    fn pose(&self) -> HandPose {
        let pose = if self.input.circle {
            HandPose::CIRCLE
        } else if self.input.rect {
            HandPose::RECT
        } else if self.input.drawing {
            HandPose::POINTER
        } else {
            HandPose::FIST
        };
        if self.input.rotate_thumb { pose.with_thumb_rotated() } else { pose }
    }
}

impl LandmarkSource for SimulatedHand {
    fn next_frame(&mut self) -> Result<Option<KeypointFrame>, AppError> {
        Ok(self.input.pointer.map(|(x, y)| self.pose().at(Point::new(x, y))))
    }

    fn feed(&mut self, input: &SimInput) {
        self.input = *input;
    }

    fn name(&self) -> &'static str { "simulator" }

    fn is_camera(&self) -> bool { false }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
