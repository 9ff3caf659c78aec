//! Top-level loop: capture → detect → map/apply → render → present → poll.
//!
//! All state that survives an iteration lives in [`LoopState`]; the frame
//! itself is created and dropped within one iteration.  The camera,
//! detector and window are acquired once in [`run`] and released when it
//! returns, whichever way the loop ended.

use std::sync::mpsc::Sender;
use std::time::Instant;

use tracing::{debug, info, warn};

use hand_landmarks::{HandDetector, SimInput};
use volume_sink::{VolumeBackend, VolumeSink};

use crate::display::{Display, Presenter};
use crate::error::AppError;
use crate::gesture::{GestureConfig, GestureMapper, PinchReading};
use crate::overlay::{self, FpsCounter};
use crate::source::FrameSource;

/// Per-frame debug logging cadence.
const LOG_EVERY: u64 = 30;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Which values reach the sink on a hand frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Only the smoothed volume.
    #[default]
    Smoothed,
    /// The smoothed volume, immediately overwritten by the raw target.
    /// The device ends each frame at the unsmoothed level.
    Legacy,
}

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub width:        usize,
    pub height:       usize,
    /// Mirror frames before detection (selfie view).
    pub mirror:       bool,
    pub camera_index: i32,
    pub gesture:      GestureConfig,
    pub apply:        ApplyMode,
    pub backend:      VolumeBackend,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:        640,
            height:       480,
            mirror:       true,
            camera_index: 0,
            gesture:      GestureConfig::default(),
            apply:        ApplyMode::default(),
            backend:      default_backend(),
            window_title: "Img".to_string(),
        }
    }
}

#[cfg(feature = "midi")]
fn default_backend() -> VolumeBackend { VolumeBackend::Midi }

#[cfg(not(feature = "midi"))]
fn default_backend() -> VolumeBackend { VolumeBackend::default() }

// ════════════════════════════════════════════════════════════════════════════
// Run state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    QuitKey,
    WindowClosed,
    CaptureFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped(StopReason),
}

// ════════════════════════════════════════════════════════════════════════════
// LoopState
// ════════════════════════════════════════════════════════════════════════════

pub struct LoopState {
    pub mapper: GestureMapper,
    pub fps:    FpsCounter,
    apply:      ApplyMode,
    mirror:     bool,
    frames:     u64,
}

impl LoopState {
    /// `initial_db` is the sink's level at startup.
    pub fn new(cfg: &AppConfig, initial_db: f32) -> Self {
        LoopState {
            mapper: GestureMapper::new(cfg.gesture, initial_db),
            fps:    FpsCounter::new(),
            apply:  cfg.apply,
            mirror: cfg.mirror,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 { self.frames }

    fn apply<V: VolumeSink + ?Sized>(&self, sink: &mut V, r: &PinchReading) {
        write_volume(sink, r.smoothed_vol);
        if self.apply == ApplyMode::Legacy {
            write_volume(sink, r.target_vol);
        }
    }

    /// One full iteration.
    pub fn step<S, D, V, P>(
        &mut self,
        source:    &mut S,
        detector:  &mut D,
        sink:      &mut V,
        presenter: &mut P,
    ) -> Result<RunState, AppError>
    where
        S: FrameSource + ?Sized,
        D: HandDetector + ?Sized,
        V: VolumeSink + ?Sized,
        P: Presenter + ?Sized,
    {
        let mut frame = match source.read() {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "capture failed, stopping");
                return Ok(RunState::Stopped(StopReason::CaptureFailed));
            }
        };
        if self.mirror {
            frame.flip_horizontal();
        }

        let hands = detector.detect(frame.view()).unwrap_or_else(|e| {
            warn!(error = %e, "hand detection failed, treating as no hand");
            Vec::new()
        });
        let hand = hands.first();

        let reading = self.mapper.update(hand);
        if let Some(r) = &reading {
            self.apply(sink, r);
        }

        self.fps.tick(Instant::now());
        overlay::render(&mut frame, hand, reading.as_ref(), self.mapper.display(), self.fps.readout());
        presenter.present(&frame)?;

        self.frames += 1;
        if self.frames % LOG_EVERY == 0 {
            match &reading {
                Some(r) => debug!(
                    frame = self.frames, length = r.length, target = r.target_vol,
                    smoothed = r.smoothed_vol, percent = r.vol_per, "pinch"
                ),
                None => debug!(frame = self.frames, "no hand"),
            }
        }

        Ok(match presenter.poll() {
            Some(reason) => RunState::Stopped(reason),
            None         => RunState::Running,
        })
    }
}

/// A failed write is not fatal; the next hand frame tries again.
fn write_volume<V: VolumeSink + ?Sized>(sink: &mut V, db: f32) {
    if let Err(e) = sink.set_volume(db) {
        warn!(error = %e, db, "set_volume failed");
    }
}

/// Iterate until something stops the loop.
pub fn run_loop<S, D, V, P>(
    source:    &mut S,
    detector:  &mut D,
    sink:      &mut V,
    presenter: &mut P,
    state:     &mut LoopState,
) -> Result<StopReason, AppError>
where
    S: FrameSource + ?Sized,
    D: HandDetector + ?Sized,
    V: VolumeSink + ?Sized,
    P: Presenter + ?Sized,
{
    loop {
        if let RunState::Stopped(reason) = state.step(source, detector, sink, presenter)? {
            return Ok(reason);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Collaborator selection
// ════════════════════════════════════════════════════════════════════════════

/// The detector, and the channel the window should feed it (simulation only).
#[cfg(not(feature = "leap"))]
fn open_detector() -> Result<(Box<dyn HandDetector>, Option<Sender<SimInput>>), AppError> {
    let (tx, rx) = std::sync::mpsc::channel();
    Ok((Box::new(hand_landmarks::SimHandDetector::new(rx)), Some(tx)))
}

#[cfg(feature = "leap")]
fn open_detector() -> Result<(Box<dyn HandDetector>, Option<Sender<SimInput>>), AppError> {
    Ok((Box::new(hand_landmarks::LeapHandDetector::open()?), None))
}

#[cfg(not(feature = "camera"))]
fn open_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, crate::error::CaptureError> {
    Ok(Box::new(crate::source::SimFrameSource::new(cfg.width, cfg.height)))
}

#[cfg(feature = "camera")]
fn open_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, crate::error::CaptureError> {
    Ok(Box::new(crate::source::CameraSource::open(cfg.camera_index, cfg.width, cfg.height)?))
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the application entry point
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// The volume sink is acquired first: without it nothing else is worth
/// opening, and its failure is returned as an error.  A camera that cannot
/// be opened ends the run cleanly, the same as a failed read.
pub fn run(cfg: AppConfig) -> Result<StopReason, AppError> {
    let mut sink = volume_sink::open(cfg.backend, cfg.gesture.vol_range)?;
    let initial_db = sink.get_volume()?;
    info!(initial_db, apply = ?cfg.apply, "starting");

    let mut source = match open_source(&cfg) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "no frame source, stopping");
            return Ok(StopReason::CaptureFailed);
        }
    };
    let (mut detector, sim_tx) = open_detector()?;
    let mut display = Display::new(&cfg.window_title, cfg.width, cfg.height, sim_tx)?;

    let mut state = LoopState::new(&cfg, initial_db);
    let reason = run_loop(&mut source, &mut detector, &mut sink, &mut display, &mut state)?;
    info!(?reason, frames = state.frames(), final_db = state.mapper.volume().current(), "stopped");
    Ok(reason)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
