//! # pinch_volume
//!
//! Hand-gesture volume control: the distance between thumb tip and index
//! tip sets the master volume, with a live overlay of the hand, a volume
//! bar, the percentage and the frame rate.
//!
//! ## Pinch → volume mapping
//!
//! | Pinch distance | Volume | Bar top | Percent |
//! |---|---|---|---|
//! | ≤ 50 px | −65 dB | y = 400 | 0 % |
//! | 175 px | −32.5 dB | y = 275 | 50 % |
//! | ≥ 300 px | 0 dB | y = 150 | 100 % |
//!
//! The applied volume is smoothed: each hand frame moves one fifth of the
//! way toward the mapped target.  Frames without a hand change nothing.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: synthetic frames, a mouse-driven hand,
//!   and the OS mixer on Windows (in-memory volume elsewhere).
//! * `camera` — real webcam frames via OpenCV.
//! * `leap` — real hand tracking via a LeapMotion controller.
//! * `midi` — drive MIDI channel volume (CC7) instead of the OS mixer.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | mouse | move the hand |
//! | `Up` / `Down` | open / close the pinch |
//! | `H` | hide / show the hand |
//! | `Q` | quit |

pub mod error;
pub mod frame;
pub mod source;
pub mod gesture;
pub mod overlay;
pub mod display;
pub mod app;
