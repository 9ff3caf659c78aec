//! Landmark and hand data model.

use crate::detector::DetectError;

// ════════════════════════════════════════════════════════════════════════════
// Joint indices
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:     u8 = 0;
pub const THUMB_TIP: u8 = 4;
pub const INDEX_TIP: u8 = 8;

/// Skeleton edges between landmark ids: palm outline plus the five fingers.
pub const HAND_CONNECTIONS: [(u8, u8); 21] = [
    // palm
    (0, 1), (0, 5), (5, 9), (9, 13), (13, 17), (0, 17),
    // thumb
    (1, 2), (2, 3), (3, 4),
    // index
    (5, 6), (6, 7), (7, 8),
    // middle
    (9, 10), (10, 11), (11, 12),
    // ring
    (13, 14), (14, 15), (15, 16),
    // pinky
    (17, 18), (18, 19), (19, 20),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One skeletal point, in frame pixel coordinates.
///
/// Coordinates may fall outside the frame when the hand is partly out of
/// view; drawing code is expected to clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmark {
    pub id: u8,
    pub x:  i32,
    pub y:  i32,
}

impl Landmark {
    pub fn new(id: u8, x: i32, y: i32) -> Self {
        Landmark { id, x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        dx.hypot(dy)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// A detected hand: all 21 landmarks, ordered by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    /// Build a hand from 21 `(x, y)` points given in id order.
    pub fn from_points(points: &[(i32, i32)]) -> Result<Self, DetectError> {
        if points.len() != LANDMARK_COUNT {
            return Err(DetectError::LandmarkCount(points.len()));
        }
        let mut landmarks = [Landmark::new(0, 0, 0); LANDMARK_COUNT];
        for (i, &(x, y)) in points.iter().enumerate() {
            landmarks[i] = Landmark::new(i as u8, x, y);
        }
        Ok(Hand { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] { &self.landmarks }

    pub fn thumb_tip(&self) -> &Landmark { &self.landmarks[THUMB_TIP as usize] }
    pub fn index_tip(&self) -> &Landmark { &self.landmarks[INDEX_TIP as usize] }

    /// Distance between thumb tip and index tip.
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip().distance(self.index_tip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<(i32, i32)> {
        (0..LANDMARK_COUNT as i32).map(|i| (i * 10, i * 5)).collect()
    }

    #[test]
    fn from_points_assigns_ids_in_order() {
        let hand = Hand::from_points(&points()).unwrap();
        for (i, lm) in hand.landmarks().iter().enumerate() {
            assert_eq!(lm.id as usize, i);
        }
        assert_eq!(hand.thumb_tip(), &Landmark::new(4, 40, 20));
        assert_eq!(hand.index_tip(), &Landmark::new(8, 80, 40));
    }

    #[test]
    fn from_points_rejects_wrong_count() {
        let err = Hand::from_points(&points()[..20]).unwrap_err();
        assert!(matches!(err, DetectError::LandmarkCount(20)));
    }

    #[test]
    fn pinch_distance_is_euclidean() {
        let mut pts = points();
        pts[THUMB_TIP as usize] = (100, 100);
        pts[INDEX_TIP as usize] = (130, 140);
        let hand = Hand::from_points(&pts).unwrap();
        assert!((hand.pinch_distance() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn connections_cover_every_joint() {
        let mut seen = [false; LANDMARK_COUNT];
        for &(a, b) in HAND_CONNECTIONS.iter() {
            seen[a as usize] = true;
            seen[b as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        // every fingertip ends a chain
        for tip in [THUMB_TIP, INDEX_TIP, 12, 16, 20] {
            assert!(HAND_CONNECTIONS.iter().any(|&(_, b)| b == tip));
        }
    }
}
