//! MIDI channel-volume sink.
//!
//! Writes Control Change 7 on one channel of the first MIDI output port.
//! MIDI gives no way to read the level back, so `get_volume` returns the
//! last value written.
//!
//! Decibels map to CC values with the General MIDI volume curve
//! `gain_dB = 40 · log10(cc / 127)`.

use tracing::{debug, info};

use crate::{VolumeError, VolumeRange, VolumeSink};

const CC_CHANNEL_VOLUME: u8 = 7;

// ════════════════════════════════════════════════════════════════════════════
// MidiOut — abstraction over midir / test capture
// ════════════════════════════════════════════════════════════════════════════

trait MidiOut {
    fn send(&mut self, msg: &[u8]) -> Result<(), VolumeError>;
}

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn send(&mut self, msg: &[u8]) -> Result<(), VolumeError> {
        self.conn.send(msg).map_err(|e| VolumeError::Io(e.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Curve
// ════════════════════════════════════════════════════════════════════════════

/// dB → CC7 value (0–127).
pub fn db_to_cc(db: f32) -> u8 {
    let cc = 127.0 * 10f32.powf(db / 40.0);
    cc.round().clamp(0.0, 127.0) as u8
}

// ════════════════════════════════════════════════════════════════════════════
// MidiVolume
// ════════════════════════════════════════════════════════════════════════════

pub struct MidiVolume {
    out:     Box<dyn MidiOut>,
    channel: u8,
    range:   VolumeRange,
    level:   f32,
}

impl MidiVolume {
    /// Open the first MIDI output port, preferring a software synth.
    pub fn connect(range: VolumeRange) -> Result<Self, VolumeError> {
        let midi_out = midir::MidiOutput::new("pinch_volume")
            .map_err(|e| VolumeError::Acquire(e.to_string()))?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(VolumeError::NoMidiPort);
        }

        let port_idx = ports.iter().enumerate()
            .find(|(_, p)| {
                midi_out.port_name(p).map(|n| {
                    let n = n.to_lowercase();
                    n.contains("fluid") || n.contains("timidity") ||
                    n.contains("microsoft") || n.contains("synth")
                }).unwrap_or(false)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let port = &ports[port_idx];
        let name = midi_out.port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());
        info!(port = %name, "opening MIDI port");

        let conn = midi_out.connect(port, "pinch-volume")
            .map_err(|e| VolumeError::Acquire(e.to_string()))?;

        Ok(Self::with_output(Box::new(MidirOut { conn }), 0, range))
    }

    fn with_output(out: Box<dyn MidiOut>, channel: u8, range: VolumeRange) -> Self {
        MidiVolume { out, channel: channel & 0x0F, range, level: range.max_db }
    }
}

impl VolumeSink for MidiVolume {
    fn get_volume(&self) -> Result<f32, VolumeError> {
        Ok(self.level)
    }

    fn set_volume(&mut self, db: f32) -> Result<(), VolumeError> {
        let db = self.range.clamp(db);
        let cc = db_to_cc(db);
        debug!(db, cc, "MIDI channel volume");
        self.out.send(&[0xB0 | self.channel, CC_CHANNEL_VOLUME, cc])?;
        self.level = db;
        Ok(())
    }

    fn range(&self) -> VolumeRange { self.range }
    fn name(&self) -> &str { "midi-cc7" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<Vec<u8>>>>);

    impl MidiOut for Capture {
        fn send(&mut self, msg: &[u8]) -> Result<(), VolumeError> {
            self.0.lock().unwrap().push(msg.to_vec());
            Ok(())
        }
    }

    #[test]
    fn curve_endpoints() {
        assert_eq!(db_to_cc(0.0), 127);
        assert_eq!(db_to_cc(-65.0), 3);
        assert_eq!(db_to_cc(6.0), 127);
        assert_eq!(db_to_cc(-200.0), 0);
    }

    #[test]
    fn curve_halves_at_minus_12() {
        // 40·log10(0.5) ≈ -12.04 dB
        assert_eq!(db_to_cc(-12.04), 64);
    }

    #[test]
    fn set_volume_sends_cc7_on_channel() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut sink = MidiVolume::with_output(
            Box::new(Capture(sent.clone())), 2, VolumeRange::new(-65.0, 0.0),
        );
        sink.set_volume(-100.0).unwrap();
        sink.set_volume(0.0).unwrap();
        let sent = sent.lock().unwrap();
        assert_eq!(sent[0], vec![0xB2, 7, 3]);
        assert_eq!(sent[1], vec![0xB2, 7, 127]);
        assert_eq!(sink.get_volume().unwrap(), 0.0);
    }
}
