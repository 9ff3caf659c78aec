//! The detector capability.
//!
//! Consumers don't need to know whether hands came from real hardware,
//! a vision model, or the simulator.

use thiserror::Error;

use crate::landmark::Hand;

/// Errors a detector backend can raise.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("detector backend failed: {0}")]
    Backend(String),

    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),
}

/// Borrowed view of a BGR raster (3 bytes per pixel, row-major).
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub width:  usize,
    pub height: usize,
    pub bgr:    &'a [u8],
}

/// Anything that can find hands in a frame.
///
/// An empty `Vec` means "no hand in view" and is not an error.
pub trait HandDetector {
    fn detect(&mut self, frame: FrameView<'_>) -> Result<Vec<Hand>, DetectError>;
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn detect(&mut self, frame: FrameView<'_>) -> Result<Vec<Hand>, DetectError> {
        (**self).detect(frame)
    }
}
