//! Millimetre → pixel projection for 3D trackers.

/// Maps the tracker's horizontal plane (x, y in mm, y up) onto a frame.
///
/// Tracker +x is the user's right and lands on the frame's right, which is
/// already the mirrored (selfie) orientation the app displays.  Points
/// outside the box are not clamped; they land off-frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MmProjection {
    pub x_mm: (f32, f32),
    pub y_mm: (f32, f32),
}

impl Default for MmProjection {
    /// Roughly the LeapMotion interaction box above the device.
    fn default() -> Self {
        MmProjection { x_mm: (-200.0, 200.0), y_mm: (80.0, 480.0) }
    }
}

impl MmProjection {
    pub fn project(&self, x: f32, y: f32, width: usize, height: usize) -> (i32, i32) {
        let (x0, x1) = self.x_mm;
        let (y0, y1) = self.y_mm;
        let u = (x - x0) / (x1 - x0);
        // Tracker y grows upward, frame y grows downward.
        let v = 1.0 - (y - y0) / (y1 - y0);
        ((u * width as f32).round() as i32, (v * height as f32).round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_frame_corners() {
        let p = MmProjection::default();
        assert_eq!(p.project(-200.0, 480.0, 640, 480), (0, 0));
        assert_eq!(p.project(200.0, 80.0, 640, 480), (640, 480));
        assert_eq!(p.project(0.0, 280.0, 640, 480), (320, 240));
    }

    #[test]
    fn user_right_is_frame_right() {
        let p = MmProjection::default();
        let (left, _) = p.project(-50.0, 280.0, 640, 480);
        let (right, _) = p.project(50.0, 280.0, 640, 480);
        assert!(right > left);
    }

    #[test]
    fn outside_box_is_not_clamped() {
        let p = MmProjection::default();
        let (x, y) = p.project(400.0, 0.0, 640, 480);
        assert!(x > 640);
        assert!(y > 480);
    }
}
