//! gesture_draw: interactive entry point.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hand_canvas::BrushStyle;
use tracing::info;

use gesture_draw::app::{run, AppConfig};
use gesture_draw::perception::SourceKind;

#[derive(Parser, Debug)]
#[command(name = "gesture_draw", about = "Draw on a canvas with hand gestures", version)]
struct Cli {
    /// Where hand landmarks come from
    #[arg(long, value_enum, default_value = "detector")]
    source: SourceKind,

    /// Detector command line, split on whitespace
    #[arg(long, default_value = "python3 hand_detect.py")]
    detector: String,

    /// JSON-lines landmark recording (with --source replay)
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Use camera coordinates as-is instead of a mirrored selfie view
    #[arg(long)]
    no_mirror: bool,

    /// Directory for saved drawings
    #[arg(long, default_value = ".")]
    save_dir: PathBuf,

    /// Start with the thick brush
    #[arg(long)]
    thick: bool,

    /// Starting brush style
    #[arg(long, value_enum, default_value = "solid")]
    brush: BrushArg,

    /// Seed for spray jitter (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate cap for the window
    #[arg(long, default_value_t = 30)]
    fps: usize,

    /// Minimum detector score for a hand to count
    #[arg(long, default_value_t = 0.5)]
    min_confidence: f32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BrushArg {
    Solid,
    Dashed,
    Spray,
}

impl From<BrushArg> for BrushStyle {
    fn from(arg: BrushArg) -> Self {
        match arg {
            BrushArg::Solid  => BrushStyle::Solid,
            BrushArg::Dashed => BrushStyle::Dashed,
            BrushArg::Spray  => BrushStyle::Spray,
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        AppConfig {
            source:         cli.source,
            detector:       cli.detector.split_whitespace().map(String::from).collect(),
            replay:         cli.replay,
            mirror:         !cli.no_mirror,
            save_dir:       cli.save_dir,
            thick:          cli.thick,
            brush:          cli.brush.into(),
            seed:           cli.seed,
            fps:            cli.fps,
            min_confidence: cli.min_confidence,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_draw=info,hand_canvas=info".into()),
        )
        .init();

    info!("gesture_draw v{} starting", env!("CARGO_PKG_VERSION"));
    run(cli.into())?;
    Ok(())
}
