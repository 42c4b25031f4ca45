//! Application error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The landmark source could not be started.  Fatal; reported once.
    #[error("perception source unavailable: {0}")]
    PerceptionUnavailable(String),

    /// A running source stopped producing frames.  Ends the session cleanly.
    #[error("frame read failed: {0}")]
    FrameRead(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("could not save {path}: {reason}")]
    Save { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
