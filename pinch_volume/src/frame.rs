//! BGR raster and the drawing primitives the overlay needs.
//!
//! All primitives take signed coordinates and clip to the frame, so
//! landmarks that fall partly out of view draw what is visible.

use hand_landmarks::FrameView;

use crate::error::CaptureError;

// ════════════════════════════════════════════════════════════════════════════
// Colour
// ════════════════════════════════════════════════════════════════════════════

/// A pixel in blue-green-red byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bgr(pub u8, pub u8, pub u8);

impl Bgr {
    pub const MAGENTA: Bgr = Bgr(255, 0, 255);
    pub const GREEN:   Bgr = Bgr(0, 255, 0);
    pub const RED:     Bgr = Bgr(0, 0, 255);
    pub const WHITE:   Bgr = Bgr(255, 255, 255);
    pub const BLACK:   Bgr = Bgr(0, 0, 0);

    /// Packed 0RGB as expected by `minifb`.
    pub fn to_rgb_u32(self) -> u32 {
        let Bgr(b, g, r) = self;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// Row-major BGR raster, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width:  usize,
    height: usize,
    data:   Vec<u8>,
}

impl Frame {
    /// Black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Frame { width, height, data: vec![0; width * height * 3] }
    }

    pub fn from_bgr(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(CaptureError::BadFrame { expected, actual: data.len() });
        }
        Ok(Frame { width, height, data })
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn data(&self)   -> &[u8] { &self.data }

    pub fn view(&self) -> FrameView<'_> {
        FrameView { width: self.width, height: self.height, bgr: &self.data }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 3)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Bgr> {
        self.offset(x, y).map(|o| Bgr(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Bgr) {
        if let Some(o) = self.offset(x, y) {
            self.data[o]     = color.0;
            self.data[o + 1] = color.1;
            self.data[o + 2] = color.2;
        }
    }

    /// Mirror left↔right in place (selfie view).
    pub fn flip_horizontal(&mut self) {
        let row_len = self.width * 3;
        for row in self.data.chunks_exact_mut(row_len) {
            for x in 0..self.width / 2 {
                let a = x * 3;
                let b = (self.width - 1 - x) * 3;
                for c in 0..3 {
                    row.swap(a + c, b + c);
                }
            }
        }
    }

    /// Convert to packed 0RGB for presentation, reusing `out`'s allocation.
    pub fn to_rgb_u32(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(
            self.data.chunks_exact(3).map(|p| Bgr(p[0], p[1], p[2]).to_rgb_u32()),
        );
    }

    // ── Primitives ────────────────────────────────────────────────────────

    /// Filled rectangle between two corners (inclusive, any order).
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Bgr) {
        let (xa, xb) = (x0.min(x1).max(0), x0.max(x1).min(self.width as i32 - 1));
        let (ya, yb) = (y0.min(y1).max(0), y0.max(y1).min(self.height as i32 - 1));
        for y in ya..=yb {
            for x in xa..=xb {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Rectangle outline; the stroke is centred on the edges.
    pub fn rect_outline(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Bgr) {
        let (xa, xb) = (x0.min(x1), x0.max(x1));
        let (ya, yb) = (y0.min(y1), y0.max(y1));
        let lo = (thickness.max(1) - 1) / 2;
        let hi = thickness.max(1) - 1 - lo;
        self.fill_rect(xa - lo, ya - lo, xb + hi, ya + hi, color); // top
        self.fill_rect(xa - lo, yb - lo, xb + hi, yb + hi, color); // bottom
        self.fill_rect(xa - lo, ya - lo, xa + hi, yb + hi, color); // left
        self.fill_rect(xb - lo, ya - lo, xb + hi, yb + hi, color); // right
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Bgr) {
        let r2 = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line, stamped with a disc for thickness > 1.
    pub fn line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), thickness: i32, color: Bgr) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let r = thickness / 2;
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            if r > 0 { self.fill_circle(x, y, r, color); } else { self.set_pixel(x, y, color); }
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Bitmap text.  `(x, y)` is the bottom-left corner, each glyph is
    /// 3×5 cells of `scale`×`scale` pixels.
    pub fn text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: Bgr) {
        let scale = scale.max(1);
        let top = y - 5 * scale;
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        let px = cx + col * scale;
                        let py = top + row as i32 * scale;
                        self.fill_rect(px, py, px + scale - 1, py + scale - 1, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx >= self.width as i32 { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn count(frame: &Frame, color: Bgr) -> usize {
        frame.data().chunks_exact(3).filter(|p| Bgr(p[0], p[1], p[2]) == color).count()
    }

    #[test]
    fn from_bgr_checks_length() {
        assert!(Frame::from_bgr(2, 2, vec![0; 12]).is_ok());
        let err = Frame::from_bgr(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, CaptureError::BadFrame { expected: 12, actual: 11 }));
    }

    #[test]
    fn set_pixel_clips() {
        let mut f = Frame::new(4, 3);
        f.set_pixel(-1, 0, Bgr::WHITE);
        f.set_pixel(4, 0, Bgr::WHITE);
        f.set_pixel(0, 3, Bgr::WHITE);
        assert_eq!(count(&f, Bgr::WHITE), 0);
        f.set_pixel(3, 2, Bgr::WHITE);
        assert_eq!(f.pixel(3, 2), Some(Bgr::WHITE));
        assert_eq!(f.pixel(4, 2), None);
    }

    #[test]
    fn flip_horizontal_mirrors_rows() {
        let mut f = Frame::new(3, 2);
        f.set_pixel(0, 0, Bgr::RED);
        f.set_pixel(1, 1, Bgr::GREEN);
        f.flip_horizontal();
        assert_eq!(f.pixel(2, 0), Some(Bgr::RED));
        assert_eq!(f.pixel(0, 0), Some(Bgr::BLACK));
        assert_eq!(f.pixel(1, 1), Some(Bgr::GREEN));
    }

    #[test]
    fn to_rgb_u32_swaps_channel_order() {
        let mut f = Frame::new(2, 1);
        f.set_pixel(0, 0, Bgr(0x11, 0x22, 0x33));
        let mut out = Vec::new();
        f.to_rgb_u32(&mut out);
        assert_eq!(out, vec![0x0033_2211, 0]);
    }

    #[test]
    fn fill_rect_is_inclusive_and_order_free() {
        let mut f = Frame::new(10, 10);
        f.fill_rect(5, 5, 2, 3, Bgr::GREEN);
        assert_eq!(count(&f, Bgr::GREEN), 4 * 3);
        assert_eq!(f.pixel(2, 3), Some(Bgr::GREEN));
        assert_eq!(f.pixel(5, 5), Some(Bgr::GREEN));
    }

    #[test]
    fn rect_outline_leaves_interior() {
        let mut f = Frame::new(20, 20);
        f.rect_outline(5, 5, 14, 14, 3, Bgr::GREEN);
        assert_eq!(f.pixel(4, 10), Some(Bgr::GREEN));
        assert_eq!(f.pixel(6, 10), Some(Bgr::GREEN));
        assert_eq!(f.pixel(10, 10), Some(Bgr::BLACK));
        assert_eq!(f.pixel(2, 2), Some(Bgr::BLACK));
    }

    #[test]
    fn fill_circle_covers_disc() {
        let mut f = Frame::new(40, 40);
        f.fill_circle(20, 20, 15, Bgr::MAGENTA);
        assert_eq!(f.pixel(20, 20), Some(Bgr::MAGENTA));
        assert_eq!(f.pixel(35, 20), Some(Bgr::MAGENTA));
        assert_eq!(f.pixel(31, 31), Some(Bgr::BLACK));
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut f = Frame::new(50, 50);
        f.line((3, 4), (40, 30), 1, Bgr::WHITE);
        assert_eq!(f.pixel(3, 4), Some(Bgr::WHITE));
        assert_eq!(f.pixel(40, 30), Some(Bgr::WHITE));
        // thin Bresenham line: one pixel per major-axis step
        assert_eq!(count(&f, Bgr::WHITE), 38);
    }

    #[test]
    fn thick_line_is_wider() {
        let mut thin = Frame::new(50, 50);
        let mut thick = Frame::new(50, 50);
        thin.line((5, 25), (45, 25), 1, Bgr::WHITE);
        thick.line((5, 25), (45, 25), 3, Bgr::WHITE);
        assert_eq!(thick.pixel(25, 24), Some(Bgr::WHITE));
        assert!(count(&thick, Bgr::WHITE) > count(&thin, Bgr::WHITE));
    }

    #[test]
    fn text_sits_above_baseline() {
        let mut f = Frame::new(100, 60);
        f.text("1%", 10, 50, 4, Bgr::GREEN);
        assert!(count(&f, Bgr::GREEN) > 0);
        for y in 50..60 {
            for x in 0..100 {
                assert_eq!(f.pixel(x, y), Some(Bgr::BLACK));
            }
        }
        // '1' top row is the middle column only
        assert_eq!(f.pixel(10 + 4, 30), Some(Bgr::GREEN));
        assert_eq!(f.pixel(10, 30), Some(Bgr::BLACK));
    }
}
