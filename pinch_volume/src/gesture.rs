//! Pinch distance → volume mapping.
//!
//! The thumb–index distance is linearly mapped (clamped at both ends) onto
//! three independent ranges: the volume in dB, the bar's fill position in
//! pixels, and a display percentage.  The volume actually driven is an
//! exponential moving average toward the instantaneous target:
//!
//! ```text
//! current ← current − (current − target) / smoothing_factor
//! ```
//!
//! With the default factor of 5 each frame closes one fifth of the gap, so
//! after N frames at a constant target the remaining gap is `(4/5)^N` of
//! the starting gap.

use hand_landmarks::Hand;
use volume_sink::VolumeRange;

/// Below this distance the pinch counts as closed.
pub const PINCH_CLOSED_BELOW: f32 = 50.0;

// ════════════════════════════════════════════════════════════════════════════
// interp
// ════════════════════════════════════════════════════════════════════════════

/// Linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`, clamped to
/// the endpoint values outside the input range.  `x0 < x1` is assumed;
/// `y0 > y1` gives an inverted mapping.
pub fn interp(x: f32, (x0, x1): (f32, f32), (y0, y1): (f32, f32)) -> f32 {
    if x <= x0 { return y0; }
    if x >= x1 { return y1; }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

// ════════════════════════════════════════════════════════════════════════════
// GestureConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Pinch distances (px) mapped to the ends of every output range.
    pub hand_range:       (f32, f32),
    pub vol_range:        VolumeRange,
    /// Bar fill top edge (px): empty at the first value, full at the second.
    pub bar_range:        (f32, f32),
    pub per_range:        (f32, f32),
    /// EMA divisor; values below 1 are treated as 1 (no overshoot).
    pub smoothing_factor: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            hand_range:       (50.0, 300.0),
            vol_range:        VolumeRange::new(-65.0, 0.0),
            bar_range:        (400.0, 150.0),
            per_range:        (0.0, 100.0),
            smoothing_factor: 5.0,
        }
    }
}

/// The three mapped outputs for one pinch distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapped {
    pub target_vol: f32,
    pub vol_bar:    f32,
    pub vol_per:    f32,
}

impl GestureConfig {
    pub fn map_length(&self, length: f32) -> Mapped {
        Mapped {
            target_vol: interp(length, self.hand_range, (self.vol_range.min_db, self.vol_range.max_db)),
            vol_bar:    interp(length, self.hand_range, self.bar_range),
            vol_per:    interp(length, self.hand_range, self.per_range),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// State carried across frames
// ════════════════════════════════════════════════════════════════════════════

/// Smoothed volume; always within the configured range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeState {
    current_vol: f32,
}

impl VolumeState {
    /// Seed from the device level, clamped into `range`.
    pub fn new(initial_db: f32, range: VolumeRange) -> Self {
        VolumeState { current_vol: range.clamp(initial_db) }
    }

    pub fn current(&self) -> f32 { self.current_vol }

    /// One EMA step toward `target`; returns the new smoothed value.
    pub fn smooth_toward(&mut self, target: f32, factor: f32) -> f32 {
        self.current_vol -= (self.current_vol - target) / factor.max(1.0);
        self.current_vol
    }
}

/// What the bar and percentage text show.  Only hand frames update it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayState {
    pub vol_bar: f32,
    pub vol_per: f32,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState { vol_bar: 400.0, vol_per: 0.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PinchReading
// ════════════════════════════════════════════════════════════════════════════

/// Everything derived from one hand frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchReading {
    pub thumb:        (i32, i32),
    pub index:        (i32, i32),
    pub center:       (i32, i32),
    pub length:       f32,
    pub target_vol:   f32,
    /// Smoothed volume after this frame's update; this is what gets applied.
    pub smoothed_vol: f32,
    pub vol_bar:      f32,
    pub vol_per:      f32,
    pub pinch_closed: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureMapper
// ════════════════════════════════════════════════════════════════════════════

pub struct GestureMapper {
    config:  GestureConfig,
    volume:  VolumeState,
    display: DisplayState,
}

impl GestureMapper {
    pub fn new(config: GestureConfig, initial_db: f32) -> Self {
        GestureMapper {
            volume:  VolumeState::new(initial_db, config.vol_range),
            display: DisplayState::default(),
            config,
        }
    }

    pub fn volume(&self)  -> &VolumeState  { &self.volume }
    pub fn display(&self) -> &DisplayState { &self.display }

    /// Advance one frame.
    ///
    /// `None` (no hand) leaves both the smoothed volume and the display
    /// untouched and yields no reading.
    pub fn update(&mut self, hand: Option<&Hand>) -> Option<PinchReading> {
        let hand = hand?;
        let (t, i) = (hand.thumb_tip(), hand.index_tip());
        let length = hand.pinch_distance();
        let mapped = self.config.map_length(length);

        let smoothed_vol = self.volume.smooth_toward(mapped.target_vol, self.config.smoothing_factor);
        self.display = DisplayState { vol_bar: mapped.vol_bar, vol_per: mapped.vol_per };

        Some(PinchReading {
            thumb:        (t.x, t.y),
            index:        (i.x, i.y),
            // Floor division; off-frame tips can be negative.
            center:       ((t.x + i.x).div_euclid(2), (t.y + i.y).div_euclid(2)),
            length,
            target_vol:   mapped.target_vol,
            smoothed_vol,
            vol_bar:      mapped.vol_bar,
            vol_per:      mapped.vol_per,
            pinch_closed: length < PINCH_CLOSED_BELOW,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
