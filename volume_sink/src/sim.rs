//! In-memory volume sink.

use crate::{VolumeError, VolumeRange, VolumeSink};

/// Holds a level and remembers every write, in order.
#[derive(Clone, Debug)]
pub struct SimVolume {
    range:   VolumeRange,
    level:   f32,
    history: Vec<f32>,
}

impl SimVolume {
    pub fn new(range: VolumeRange, initial_db: f32) -> Self {
        SimVolume {
            range,
            level:   range.clamp(initial_db),
            history: Vec::new(),
        }
    }

    /// Every value passed to `set_volume`, after clamping.
    pub fn history(&self) -> &[f32] { &self.history }
}

impl VolumeSink for SimVolume {
    fn get_volume(&self) -> Result<f32, VolumeError> {
        Ok(self.level)
    }

    fn set_volume(&mut self, db: f32) -> Result<(), VolumeError> {
        self.level = self.range.clamp(db);
        self.history.push(self.level);
        Ok(())
    }

    fn range(&self) -> VolumeRange { self.range }
    fn name(&self) -> &str { "simulated" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_level_is_clamped() {
        let sink = SimVolume::new(VolumeRange::new(-65.0, 0.0), -96.0);
        assert_eq!(sink.get_volume().unwrap(), -65.0);
        assert!(sink.history().is_empty());
    }

    #[test]
    fn writes_are_clamped_and_recorded() {
        let mut sink = SimVolume::new(VolumeRange::new(-65.0, 0.0), 0.0);
        sink.set_volume(-10.0).unwrap();
        sink.set_volume(5.0).unwrap();
        assert_eq!(sink.history(), &[-10.0, 0.0]);
        assert_eq!(sink.get_volume().unwrap(), 0.0);
    }
}
