//! Simulated hand, steered by window input.
//!
//! The display window sends [`SimInput`] events over a channel; the
//! detector drains them on every `detect` call and synthesises a full
//! 21-point hand around the current pointer.  Only the thumb tip and
//! index tip move with the pinch spread; the rest of the skeleton is a
//! fixed template so the overlay looks like a hand.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::debug;

use crate::detector::{DetectError, FrameView, HandDetector};
use crate::landmark::{Hand, LANDMARK_COUNT, INDEX_TIP, THUMB_TIP};

/// Spread change per `Widen` / `Narrow` event, in pixels.
pub const SPREAD_STEP: f32 = 10.0;
pub const MAX_SPREAD:  f32 = 400.0;
const DEFAULT_SPREAD:  f32 = 120.0;

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer moved: the pinch midpoint follows it.
    Pointer { x: i32, y: i32 },
    /// Open the pinch by one step (Up arrow).
    Widen,
    /// Close the pinch by one step (Down arrow).
    Narrow,
    /// Show / hide the hand (H).
    ToggleHand,
}

// Wrist-relative offsets for the joints that don't follow the pinch.
// Thumb IP (3) and index DIP (7) are interpolated toward their tips.
const TEMPLATE: [(i32, i32); LANDMARK_COUNT] = [
    (0, 0),                                      // wrist
    (-30, -20), (-50, -45), (0, 0), (0, 0),      // thumb
    (-20, -90), (-22, -125), (0, 0), (0, 0),     // index
    (0, -95), (0, -135), (0, -160), (0, -182),   // middle
    (18, -88), (22, -122), (24, -145), (26, -165), // ring
    (34, -76), (42, -100), (47, -118), (51, -134), // pinky
];

/// Pixels from the pinch midpoint down to the wrist.
const WRIST_DROP: i32 = 140;

/// Detector that fabricates a hand from [`SimInput`] events.
pub struct SimHandDetector {
    rx:      Option<Receiver<SimInput>>,
    anchor:  (i32, i32),
    spread:  f32,
    visible: bool,
}

impl SimHandDetector {
    /// Hand centred at (320, 240), fed by `rx`.
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimHandDetector {
            rx:      Some(rx),
            anchor:  (320, 240),
            spread:  DEFAULT_SPREAD,
            visible: true,
        }
    }

    /// A fixed hand with no input channel.
    pub fn fixed(anchor: (i32, i32), spread: f32) -> Self {
        SimHandDetector {
            rx:      None,
            anchor,
            spread:  spread.clamp(0.0, MAX_SPREAD),
            visible: true,
        }
    }

    #[cfg(test)]
    fn spread(&self) -> f32 { self.spread }

    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => self.anchor = (x, y),
            SimInput::Widen  => self.spread = (self.spread + SPREAD_STEP).min(MAX_SPREAD),
            SimInput::Narrow => self.spread = (self.spread - SPREAD_STEP).max(0.0),
            SimInput::ToggleHand => {
                self.visible = !self.visible;
                debug!(visible = self.visible, "simulated hand toggled");
            }
        }
    }

    fn drain(&mut self) {
        let Some(rx) = self.rx.take() else { return };
        let mut connected = true;
        loop {
            match rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => { connected = false; break; }
            }
        }
        if connected {
            self.rx = Some(rx);
        }
    }

    /// Build the synthetic hand for the current pointer and spread.
    ///
    /// Thumb and index tips sit on a diagonal through the anchor, `spread`
    /// pixels apart.
    pub fn synthesize(&self) -> Result<Hand, DetectError> {
        let (ax, ay) = self.anchor;
        let s = self.spread;
        let thumb = (
            (ax as f32 - 0.3 * s).round() as i32,
            (ay as f32 + 0.4 * s).round() as i32,
        );
        let index = (
            (ax as f32 + 0.3 * s).round() as i32,
            (ay as f32 - 0.4 * s).round() as i32,
        );
        let wrist = (ax, ay + WRIST_DROP);

        let mut points: Vec<(i32, i32)> = TEMPLATE.iter()
            .map(|&(dx, dy)| (wrist.0 + dx, wrist.1 + dy))
            .collect();
        points[THUMB_TIP as usize] = thumb;
        points[INDEX_TIP as usize] = index;
        points[3] = midpoint(points[2], thumb);
        points[7] = midpoint(points[6], index);

        Hand::from_points(&points)
    }
}

fn midpoint(a: (i32, i32), b: (i32, i32)) -> (i32, i32) {
    ((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}

impl HandDetector for SimHandDetector {
    fn detect(&mut self, _frame: FrameView<'_>) -> Result<Vec<Hand>, DetectError> {
        self.drain();
        if !self.visible {
            return Ok(Vec::new());
        }
        Ok(vec![self.synthesize()?])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use crate::landmark::WRIST;

    fn view() -> FrameView<'static> {
        FrameView { width: 640, height: 480, bgr: &[] }
    }

    #[test]
    fn fixed_hand_has_requested_spread() {
        let mut det = SimHandDetector::fixed((320, 240), 100.0);
        let hands = det.detect(view()).unwrap();
        assert_eq!(hands.len(), 1);
        let hand = &hands[0];
        assert!((hand.pinch_distance() - 100.0).abs() <= 1.0);
        // Tips are symmetric about the anchor.
        let t = hand.thumb_tip();
        let i = hand.index_tip();
        assert_eq!(((t.x + i.x) / 2, (t.y + i.y) / 2), (320, 240));
    }

    #[test]
    fn pointer_moves_the_hand() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimHandDetector::new(rx);
        tx.send(SimInput::Pointer { x: 100, y: 200 }).unwrap();
        let hand = det.detect(view()).unwrap().remove(0);
        let wrist = hand.landmarks()[WRIST as usize];
        assert_eq!((wrist.x, wrist.y), (100, 200 + WRIST_DROP));
    }

    #[test]
    fn widen_and_narrow_step_the_spread() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimHandDetector::new(rx);
        tx.send(SimInput::Widen).unwrap();
        tx.send(SimInput::Widen).unwrap();
        tx.send(SimInput::Narrow).unwrap();
        det.detect(view()).unwrap();
        assert_eq!(det.spread(), DEFAULT_SPREAD + SPREAD_STEP);
    }

    #[test]
    fn spread_is_clamped() {
        let mut det = SimHandDetector::fixed((0, 0), 5.0);
        det.apply(SimInput::Narrow);
        assert_eq!(det.spread(), 0.0);
        let mut det = SimHandDetector::fixed((0, 0), MAX_SPREAD);
        det.apply(SimInput::Widen);
        assert_eq!(det.spread(), MAX_SPREAD);
    }

    #[test]
    fn toggle_hides_hand() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimHandDetector::new(rx);
        tx.send(SimInput::ToggleHand).unwrap();
        assert!(det.detect(view()).unwrap().is_empty());
        tx.send(SimInput::ToggleHand).unwrap();
        assert_eq!(det.detect(view()).unwrap().len(), 1);
    }

    #[test]
    fn disconnected_channel_keeps_last_state() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimHandDetector::new(rx);
        tx.send(SimInput::Pointer { x: 50, y: 60 }).unwrap();
        drop(tx);
        det.detect(view()).unwrap();
        let hand = det.detect(view()).unwrap().remove(0);
        let t = hand.thumb_tip();
        let i = hand.index_tip();
        assert_eq!(((t.x + i.x) / 2, (t.y + i.y) / 2), (50, 60));
    }
}
