use std::fmt;

/// Closed decibel interval `[min_db, max_db]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeRange {
    pub min_db: f32,
    pub max_db: f32,
}

impl VolumeRange {
    /// Endpoints are reordered if given backwards.
    pub fn new(a: f32, b: f32) -> Self {
        VolumeRange { min_db: a.min(b), max_db: a.max(b) }
    }

    pub fn clamp(&self, db: f32) -> f32 {
        db.clamp(self.min_db, self.max_db)
    }
}

impl fmt::Display for VolumeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}] dB", self.min_db, self.max_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_endpoints() {
        let r = VolumeRange::new(0.0, -65.0);
        assert_eq!(r.min_db, -65.0);
        assert_eq!(r.max_db, 0.0);
    }

    #[test]
    fn clamp_limits_to_endpoints() {
        let r = VolumeRange::new(-65.0, 0.0);
        assert_eq!(r.clamp(-80.0), -65.0);
        assert_eq!(r.clamp(3.0), 0.0);
        assert_eq!(r.clamp(-12.5), -12.5);
        assert_eq!(r.clamp(-65.0), -65.0);
    }

    #[test]
    fn display() {
        assert_eq!(VolumeRange::new(-65.0, 0.0).to_string(), "[-65.0, 0.0] dB");
    }
}
