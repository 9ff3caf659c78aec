//! # volume_sink
//!
//! A small get/set interface over "the master volume", in decibels, so the
//! gesture logic never touches a platform mixer API directly.
//!
//! | Backend | Target | Notes |
//! |---|---|---|
//! | [`EndpointVolume`] | Windows default render endpoint | `IAudioEndpointVolume` via COM |
//! | [`MidiVolume`] | first MIDI output port | CC7 channel volume, GM dB curve |
//! | [`SimVolume`] | in memory | records every write; used by tests and simulation |
//!
//! ```rust
//! use volume_sink::{SimVolume, VolumeRange, VolumeSink};
//!
//! let mut sink = SimVolume::new(VolumeRange::new(-65.0, 0.0), -20.0);
//! sink.set_volume(-32.5).unwrap();
//! assert_eq!(sink.get_volume().unwrap(), -32.5);
//! ```

use thiserror::Error;
use tracing::info;

pub mod range;
pub mod sim;
pub mod midi;
pub mod endpoint;

pub use range::VolumeRange;
pub use sim::SimVolume;
pub use midi::MidiVolume;
pub use endpoint::EndpointVolume;

// ════════════════════════════════════════════════════════════════════════════
// VolumeError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("volume backend `{0}` is not available on this platform")]
    Unsupported(&'static str),

    #[error("failed to acquire audio device: {0}")]
    Acquire(String),

    #[error("audio device I/O failed: {0}")]
    Io(String),

    #[error("no MIDI output port found")]
    NoMidiPort,
}

// ════════════════════════════════════════════════════════════════════════════
// VolumeSink trait
// ════════════════════════════════════════════════════════════════════════════

/// A master volume that can be read and written in decibels.
pub trait VolumeSink {
    fn get_volume(&self) -> Result<f32, VolumeError>;
    fn set_volume(&mut self, db: f32) -> Result<(), VolumeError>;
    /// Range the backend accepts; writes outside it are clamped.
    fn range(&self) -> VolumeRange;
    fn name(&self) -> &str;
}

impl<S: VolumeSink + ?Sized> VolumeSink for Box<S> {
    fn get_volume(&self) -> Result<f32, VolumeError> { (**self).get_volume() }
    fn set_volume(&mut self, db: f32) -> Result<(), VolumeError> { (**self).set_volume(db) }
    fn range(&self) -> VolumeRange { (**self).range() }
    fn name(&self) -> &str { (**self).name() }
}

// ════════════════════════════════════════════════════════════════════════════
// Backend selection
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeBackend {
    /// OS default output device (Windows only).
    Endpoint,
    /// MIDI channel volume on the first output port.
    Midi,
    /// In-memory sink.
    Simulated,
}

impl Default for VolumeBackend {
    fn default() -> Self {
        if cfg!(windows) { VolumeBackend::Endpoint } else { VolumeBackend::Simulated }
    }
}

/// Acquire the requested backend.
///
/// `range` bounds the simulated and MIDI sinks; the endpoint sink reports
/// the device's own range.
pub fn open(backend: VolumeBackend, range: VolumeRange) -> Result<Box<dyn VolumeSink>, VolumeError> {
    let sink: Box<dyn VolumeSink> = match backend {
        VolumeBackend::Endpoint  => Box::new(EndpointVolume::open()?),
        VolumeBackend::Midi      => Box::new(MidiVolume::connect(range)?),
        VolumeBackend::Simulated => Box::new(SimVolume::new(range, range.max_db)),
    };
    info!(sink = sink.name(), range = %sink.range(), "volume sink acquired");
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_simulated_starts_at_max() {
        let sink = open(VolumeBackend::Simulated, VolumeRange::new(-65.0, 0.0)).unwrap();
        assert_eq!(sink.get_volume().unwrap(), 0.0);
        assert_eq!(sink.name(), "simulated");
    }

    #[cfg(not(windows))]
    #[test]
    fn endpoint_is_unsupported_off_windows() {
        let err = open(VolumeBackend::Endpoint, VolumeRange::new(-65.0, 0.0)).err().unwrap();
        assert!(matches!(err, VolumeError::Unsupported(_)));
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<dyn VolumeSink> = Box::new(SimVolume::new(VolumeRange::new(-10.0, 0.0), 0.0));
        sink.set_volume(-4.0).unwrap();
        assert_eq!(sink.get_volume().unwrap(), -4.0);
    }
}
