//! Error types for the core crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("hand frame needs {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },
}
