//! Per-frame overlay: hand skeleton, pinch markers, volume bar, percentage
//! and FPS readout.
//!
//! Layout (640×480):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ FPS: 30                                      │
//! │                                              │
//! │  ┌──┐ y=150          ●  thumb                │
//! │  │  │                 \                      │
//! │  │██│ y=vol_bar        ●  midpoint           │
//! │  │██│                   \                    │
//! │  └──┘ y=400              ●  index            │
//! │ 73%                                          │
//! └──────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use hand_landmarks::{Hand, HAND_CONNECTIONS};

use crate::frame::{Bgr, Frame};
use crate::gesture::{DisplayState, PinchReading};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const BAR_LEFT:    i32 = 50;
const BAR_RIGHT:   i32 = 85;
const BAR_TOP:     i32 = 150;
const BAR_BOTTOM:  i32 = 400;
const BAR_STROKE:  i32 = 3;
const TIP_RADIUS:  i32 = 15;
const PINCH_LINE:  i32 = 3;
const JOINT_RADIUS: i32 = 4;
const BONE_WIDTH:  i32 = 2;
const TEXT_SCALE:  i32 = 5;
const PERCENT_AT:  (i32, i32) = (40, 450);
const FPS_AT:      (i32, i32) = (10, 50);

// ════════════════════════════════════════════════════════════════════════════
// FpsCounter
// ════════════════════════════════════════════════════════════════════════════

/// `1 / Δt` between consecutive ticks.
///
/// The first tick has nothing to measure against, and a zero or negative
/// Δt (coarse clocks) is skipped rather than divided by.
#[derive(Debug, Default)]
pub struct FpsCounter {
    prev: Option<Instant>,
    last: Option<f32>,
}

impl FpsCounter {
    pub fn new() -> Self { Self::default() }

    /// Record a frame at `now`; returns this frame's rate if measurable.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let fps = self.prev
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32())
            .filter(|&dt| dt > 0.0)
            .map(|dt| 1.0 / dt);
        self.prev = Some(now);
        if fps.is_some() {
            self.last = fps;
        }
        fps
    }

    /// Integer readout: last measured rate, 0 before the first measurement.
    pub fn readout(&self) -> u32 {
        self.last.map_or(0, |f| f as u32)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Drawing
// ════════════════════════════════════════════════════════════════════════════

/// Skeleton lines and a dot on every joint.
pub fn draw_hand(frame: &mut Frame, hand: &Hand) {
    let lm = hand.landmarks();
    for &(a, b) in HAND_CONNECTIONS.iter() {
        let (pa, pb) = (lm[a as usize], lm[b as usize]);
        frame.line((pa.x, pa.y), (pb.x, pb.y), BONE_WIDTH, Bgr::WHITE);
    }
    for p in lm.iter() {
        frame.fill_circle(p.x, p.y, JOINT_RADIUS, Bgr::RED);
    }
}

/// Fingertip discs, the connecting line and the midpoint marker, which
/// turns green while the pinch is closed.
pub fn draw_pinch(frame: &mut Frame, r: &PinchReading) {
    frame.fill_circle(r.thumb.0, r.thumb.1, TIP_RADIUS, Bgr::MAGENTA);
    frame.fill_circle(r.index.0, r.index.1, TIP_RADIUS, Bgr::MAGENTA);
    frame.line(r.thumb, r.index, PINCH_LINE, Bgr::MAGENTA);
    let center = if r.pinch_closed { Bgr::GREEN } else { Bgr::MAGENTA };
    frame.fill_circle(r.center.0, r.center.1, TIP_RADIUS, center);
}

pub fn draw_volume_bar(frame: &mut Frame, display: &DisplayState) {
    frame.rect_outline(BAR_LEFT, BAR_TOP, BAR_RIGHT, BAR_BOTTOM, BAR_STROKE, Bgr::GREEN);
    frame.fill_rect(BAR_LEFT, display.vol_bar as i32, BAR_RIGHT, BAR_BOTTOM, Bgr::GREEN);
    let label = format!("{}%", display.vol_per as i32);
    frame.text(&label, PERCENT_AT.0, PERCENT_AT.1, TEXT_SCALE, Bgr::GREEN);
}

pub fn draw_fps(frame: &mut Frame, fps: u32) {
    frame.text(&format!("FPS: {fps}"), FPS_AT.0, FPS_AT.1, TEXT_SCALE, Bgr::GREEN);
}

/// Full overlay for one frame.  Hand markers are drawn only on hand
/// frames; the bar and text always show the last display state.
pub fn render(
    frame:   &mut Frame,
    hand:    Option<&Hand>,
    reading: Option<&PinchReading>,
    display: &DisplayState,
    fps:     u32,
) {
    if let Some(hand) = hand {
        draw_hand(frame, hand);
    }
    if let Some(r) = reading {
        draw_pinch(frame, r);
    }
    draw_volume_bar(frame, display);
    draw_fps(frame, fps);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reading(closed: bool) -> PinchReading {
        PinchReading {
            thumb:        (300, 200),
            index:        (400, 200),
            center:       (350, 200),
            length:       100.0,
            target_vol:   -39.0,
            smoothed_vol: -50.0,
            vol_bar:      300.0,
            vol_per:      20.0,
            pinch_closed: closed,
        }
    }

    // ── FpsCounter ───────────────────────────────────────────────────────
    #[test]
    fn first_tick_has_no_reading() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.tick(Instant::now()), None);
        assert_eq!(fps.readout(), 0);
    }

    #[test]
    fn zero_delta_is_guarded() {
        let mut fps = FpsCounter::new();
        let t = Instant::now();
        fps.tick(t);
        assert_eq!(fps.tick(t), None);
        assert_eq!(fps.readout(), 0);
    }

    #[test]
    fn rate_is_inverse_of_delta() {
        let mut fps = FpsCounter::new();
        let t0 = Instant::now();
        fps.tick(t0);
        let f = fps.tick(t0 + Duration::from_millis(40)).unwrap();
        assert!((f - 25.0).abs() < 0.01);
        assert_eq!(fps.readout(), 25);
        // a zero-delta frame keeps the previous readout
        fps.tick(t0 + Duration::from_millis(40));
        assert_eq!(fps.readout(), 25);
    }

    // ── bar ──────────────────────────────────────────────────────────────
    #[test]
    fn bar_fill_starts_at_vol_bar() {
        let mut f = Frame::new(640, 480);
        draw_volume_bar(&mut f, &DisplayState { vol_bar: 275.0, vol_per: 50.0 });
        assert_eq!(f.pixel(67, 274), Some(Bgr::BLACK));
        assert_eq!(f.pixel(67, 275), Some(Bgr::GREEN));
        assert_eq!(f.pixel(67, 399), Some(Bgr::GREEN));
        // outline present above the fill
        assert_eq!(f.pixel(BAR_LEFT, 200), Some(Bgr::GREEN));
        assert_eq!(f.pixel(67, BAR_TOP), Some(Bgr::GREEN));
    }

    #[test]
    fn empty_bar_is_only_outline() {
        let mut f = Frame::new(640, 480);
        draw_volume_bar(&mut f, &DisplayState::default());
        assert_eq!(f.pixel(67, 300), Some(Bgr::BLACK));
        assert_eq!(f.pixel(67, 400), Some(Bgr::GREEN));
    }

    // ── pinch ────────────────────────────────────────────────────────────
    #[test]
    fn midpoint_turns_green_when_closed() {
        let mut open = Frame::new(640, 480);
        draw_pinch(&mut open, &reading(false));
        assert_eq!(open.pixel(350, 200), Some(Bgr::MAGENTA));

        let mut closed = Frame::new(640, 480);
        draw_pinch(&mut closed, &reading(true));
        assert_eq!(closed.pixel(350, 190), Some(Bgr::GREEN));
        assert_eq!(closed.pixel(300, 200), Some(Bgr::MAGENTA));
        assert_eq!(closed.pixel(400, 200), Some(Bgr::MAGENTA));
    }

    #[test]
    fn render_without_hand_draws_no_markers() {
        let mut f = Frame::new(640, 480);
        render(&mut f, None, None, &DisplayState::default(), 0);
        assert!(f.data().chunks_exact(3).all(|p| p != [255, 0, 255]));
        // FPS text occupies the top-left band
        assert!((25..50).any(|y| (10..120).any(|x| f.pixel(x, y) == Some(Bgr::GREEN))));
    }
}
