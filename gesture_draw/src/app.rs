//! Top-level application loop.
//!
//! `App` owns the drawing [`Session`] and the landmark source.  One
//! [`App::tick`] is one frame: read a hand, step the session, carry out the
//! side effects it asks for (saving).  `run` wraps that in a window.

use std::path::PathBuf;
use std::time::Instant;

use hand_canvas::{
    BrushStyle, FrameInput, KeypointFrame, RenderCommand, Session, SessionConfig, StepOutcome,
    Thickness, UserCommand, CANVAS_H, CANVAS_W,
};
use tracing::{info, warn};

use crate::error::AppError;
use crate::perception::{DetectorProcess, LandmarkSource, ReplaySource, SimulatedHand, SourceKind};
use crate::snapshot::save_canvas;
use crate::visualizer::{InputBatch, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub source:         SourceKind,
    /// Detector program and its arguments.
    pub detector:       Vec<String>,
    /// JSON-lines file for `SourceKind::Replay`.
    pub replay:         Option<PathBuf>,
    /// Flip camera frames horizontally into a selfie view.  Never applied
    /// to the simulator.
    pub mirror:         bool,
    pub save_dir:       PathBuf,
    pub thick:          bool,
    pub brush:          BrushStyle,
    /// Fixed spray seed; entropy when `None`.
    pub seed:           Option<u64>,
    pub fps:            usize,
    pub min_confidence: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source:         SourceKind::Detector,
            detector:       vec!["python3".into(), "hand_detect.py".into()],
            replay:         None,
            mirror:         true,
            save_dir:       PathBuf::from("."),
            thick:          false,
            brush:          BrushStyle::Solid,
            seed:           None,
            fps:            30,
            min_confidence: 0.5,
        }
    }
}

/// Start the configured landmark source.  Fails fast, before any window
/// exists.
pub fn open_source(cfg: &AppConfig) -> Result<Box<dyn LandmarkSource>, AppError> {
    Ok(match cfg.source {
        SourceKind::Detector => Box::new(DetectorProcess::spawn(&cfg.detector, cfg.min_confidence)?),
        SourceKind::Replay => {
            let path = cfg.replay.as_deref().ok_or_else(|| {
                AppError::PerceptionUnavailable("replay source needs --replay <file>".into())
            })?;
            Box::new(ReplaySource::open(path, cfg.min_confidence)?)
        }
        SourceKind::Sim => Box::new(SimulatedHand::new()),
    })
}

/// Normalized source coordinates → canvas pixels, optionally mirrored.
pub fn to_canvas_space(frame: &KeypointFrame, mirror: bool, width: usize, height: usize) -> KeypointFrame {
    let frame = if mirror { frame.mirrored() } else { frame.clone() };
    frame.to_pixels(width, height)
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

/// What the loop should do after a tick.
#[derive(Debug)]
pub enum Flow {
    /// Present this frame and keep going.
    Continue(StepOutcome),
    /// The user asked to quit.
    Quit,
    /// The landmark source stopped; end the session cleanly.
    SourceEnded(String),
}

pub struct App {
    session:  Session,
    source:   Box<dyn LandmarkSource>,
    mirror:   bool,
    save_dir: PathBuf,

    // ── status message ────────────────────────────────────────────────────
    notice:   Option<String>,
}

impl App {
    pub fn new(cfg: &AppConfig, source: Box<dyn LandmarkSource>) -> Self {
        let session_cfg = SessionConfig {
            thick: cfg.thick,
            brush: cfg.brush,
            ..SessionConfig::default()
        };
        let session = match cfg.seed {
            Some(seed) => Session::with_seed(session_cfg, seed),
            None       => Session::new(session_cfg),
        };
        App {
            session,
            mirror:   cfg.mirror && source.is_camera(),
            source,
            save_dir: cfg.save_dir.clone(),
            notice:   None,
        }
    }

    pub fn session(&self) -> &Session { &self.session }

    /// Advance one frame.
    pub fn tick(&mut self, input: &InputBatch, now: Instant) -> Result<Flow, AppError> {
        // Don't block on the source when the user is leaving anyway.
        let quitting = input.commands.contains(&UserCommand::Quit);

        let frame = if quitting {
            None
        } else {
            self.source.feed(&input.sim);
            match self.source.next_frame() {
                Ok(frame) => frame,
                Err(AppError::FrameRead(reason)) => return Ok(Flow::SourceEnded(reason)),
                Err(e) => return Err(e),
            }
        };

        let (w, h) = (self.session.canvas().width(), self.session.canvas().height());
        let frame = frame.map(|f| to_canvas_space(&f, self.mirror, w, h));

        let outcome = self.session.step(FrameInput {
            commands: &input.commands,
            frame:    frame.as_ref(),
            now,
        });

        if outcome.commands.contains(&RenderCommand::SaveCanvas) {
            self.save();
        }

        Ok(if outcome.quit { Flow::Quit } else { Flow::Continue(outcome) })
    }

    /// Save failures are reported, never fatal.
    fn save(&mut self) {
        self.notice = Some(match save_canvas(self.session.canvas(), &self.save_dir) {
            Ok(path) => format!("SAVED {}", path.display()),
            Err(e) => {
                warn!(error = %e, "save failed");
                "SAVE FAILED".to_string()
            }
        });
    }

    /// One-line status for the bottom bar.
    pub fn status(&self) -> String {
        let thickness = match self.session.thickness() {
            Thickness::Thin  => "THIN",
            Thickness::Thick => "THICK",
        };
        let mut line = format!(
            "{}  {} {}  C=CLEAR S=SAVE T=THICK B=BRUSH Q=QUIT",
            self.source.name(),
            self.session.brush().as_str(),
            thickness,
        );
        if let Some(notice) = &self.notice {
            line.push_str("  ");
            line.push_str(notice);
        }
        line
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// The landmark source is started first so an unavailable camera is
/// reported before a window opens.  Returns `Ok` on quit and when the
/// source runs dry.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let source = open_source(&cfg)?;
    info!(source = source.name(), "landmark source ready");

    let mut vis = Visualizer::new(CANVAS_W, CANVAS_H, cfg.fps)?;
    let mut app = App::new(&cfg, source);

    loop {
        let input = vis.poll_input();
        match app.tick(&input, Instant::now())? {
            Flow::Continue(outcome) => {
                vis.render(app.session().canvas(), &outcome.commands, &app.status())?;
            }
            Flow::Quit => {
                info!("quit requested");
                break;
            }
            Flow::SourceEnded(reason) => {
                warn!(%reason, "landmark source ended");
                break;
            }
        }
    }

    info!("session ended");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
