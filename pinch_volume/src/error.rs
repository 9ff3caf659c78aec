//! Error types for capture, display and the app as a whole.

use thiserror::Error;

use hand_landmarks::DetectError;
use volume_sink::VolumeError;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open camera: {0}")]
    Open(String),

    #[error("failed to read frame: {0}")]
    Read(String),

    #[error("frame source exhausted")]
    Exhausted,

    #[error("frame buffer is {actual} bytes, expected {expected}")]
    BadFrame { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("window error: {0}")]
    Window(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    Display(#[from] DisplayError),
}
