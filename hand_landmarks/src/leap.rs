//! LeapMotion-backed detector (feature = "leap").
//!
//! Requires the `leap` feature flag and the LeapC shared library installed.
//!
//! Each `detect` call drains pending LeapC messages and keeps the joints of
//! the most recent tracking frame.  Joints are projected from millimetres
//! onto the camera frame with [`MmProjection`]; depth is ignored.

use leaprs::{Connection, ConnectionConfig, Event};
use tracing::{info, warn};

use crate::detector::{DetectError, FrameView, HandDetector};
use crate::landmark::{Hand, LANDMARK_COUNT, WRIST};
use crate::projection::MmProjection;

/// Messages drained per `detect` call before giving up on a tracking event.
const MAX_POLLS:    usize = 8;
const POLL_TIMEOUT: u32   = 1;  // ms

/// Hand detector backed by a real LeapMotion controller.
pub struct LeapHandDetector {
    connection: Connection,
    projection: MmProjection,
    last:       Vec<[(f32, f32); LANDMARK_COUNT]>,
}

impl LeapHandDetector {
    pub fn open() -> Result<Self, DetectError> {
        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| DetectError::Backend(format!("LeapC connection: {e:?}")))?;
        connection.open()
            .map_err(|e| DetectError::Backend(format!("LeapMotion device: {e:?}")))?;
        info!("LeapMotion connection open");
        Ok(LeapHandDetector {
            connection,
            projection: MmProjection::default(),
            last:       Vec::new(),
        })
    }

    fn poll(&mut self) {
        for _ in 0..MAX_POLLS {
            let msg = match self.connection.poll(POLL_TIMEOUT) {
                Ok(m)  => m,
                Err(_) => return,
            };
            if let Event::Tracking(frame) = msg.event() {
                // Only the first hand is kept; the pinch gesture is single-handed.
                self.last = frame.hands().take(1).filter_map(|h| joints_mm(&h)).collect();
                return;
            }
        }
    }
}

/// Joint positions (x, y in mm) in landmark-id order.
///
/// Per finger: proximal base, intermediate base, distal base, tip.  For the
/// thumb LeapC reports a zero-length metacarpal, so the proximal base is the
/// CMC joint and the four points line up with landmarks 1–4.
fn joints_mm(hand: &leaprs::Hand) -> Option<[(f32, f32); LANDMARK_COUNT]> {
    let digits: Vec<_> = hand.digits().collect();
    if digits.len() < 5 {
        warn!(digits = digits.len(), "incomplete LeapMotion hand skipped");
        return None;
    }
    let mut out = [(0.0, 0.0); LANDMARK_COUNT];
    let wrist = digits[2].metacarpal().prev_joint();
    out[WRIST as usize] = (wrist.x, wrist.y);
    for (f, digit) in digits.iter().take(5).enumerate() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (j, p) in joints.iter().enumerate() {
            out[1 + f * 4 + j] = (p.x, p.y);
        }
    }
    Some(out)
}

impl HandDetector for LeapHandDetector {
    fn detect(&mut self, frame: FrameView<'_>) -> Result<Vec<Hand>, DetectError> {
        self.poll();
        self.last.iter()
            .map(|joints| {
                let points: Vec<(i32, i32)> = joints.iter()
                    .map(|&(x, y)| self.projection.project(x, y, frame.width, frame.height))
                    .collect();
                Hand::from_points(&points)
            })
            .collect()
    }
}
