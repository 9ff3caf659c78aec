//! # hand_landmarks
//!
//! The 21-point hand skeleton and the detectors that produce it.
//!
//! A detector is anything implementing [`HandDetector`]: give it a BGR
//! frame, get back zero or more [`Hand`]s whose landmarks are in frame
//! pixel coordinates.  The inference model behind a real detector is
//! opaque here; consumers only see landmarks.
//!
//! ## Landmark indices
//!
//! | Id | Joint | Id | Joint |
//! |---|---|---|---|
//! | 0 | wrist | 9–12 | middle MCP → tip |
//! | 1–4 | thumb CMC → tip | 13–16 | ring MCP → tip |
//! | 5–8 | index MCP → tip | 17–20 | pinky MCP → tip |
//!
//! ## Feature flags
//!
//! * (default) — [`SimHandDetector`]: a synthetic hand steered by window input.
//! * `leap` — `LeapHandDetector`: a real LeapMotion controller via LeapC.

pub mod landmark;
pub mod detector;
pub mod projection;
pub mod sim;
#[cfg(feature = "leap")]
pub mod leap;

pub use detector::{DetectError, FrameView, HandDetector};
pub use landmark::{Hand, Landmark, HAND_CONNECTIONS, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
pub use projection::MmProjection;
pub use sim::{SimHandDetector, SimInput};
#[cfg(feature = "leap")]
pub use leap::LeapHandDetector;
