use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use image::{Rgb, RgbImage};

/// Dash pattern for mean markers: 8 on, 5 off.
pub const DASHED: &[u32] = &[8, 5];
/// Dash-dot pattern for median markers.
pub const DASH_DOT: &[u32] = &[8, 4, 2, 4];

/// Clipped pixel drawing on top of an `RgbImage`.
///
/// Coordinates are signed so callers can pass values that fall outside the
/// image; out-of-bounds pixels are skipped.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.image.width() as i64 && y < self.image.height() as i64
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Alpha-blend `color` over the existing pixel.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if !self.in_bounds(x, y) {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let under = *self.image.get_pixel(x as u32, y as u32);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f64 * alpha + bottom as f64 * (1.0 - alpha)).round() as u8
        };
        self.image.put_pixel(
            x as u32,
            y as u32,
            Rgb([
                mix(color[0], under[0]),
                mix(color[1], under[1]),
                mix(color[2], under[2]),
            ]),
        );
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`; corners may be
    /// given in any order.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (xa, xb) = (x0.min(x1), x0.max(x1));
        let (ya, yb) = (y0.min(y1), y0.max(y1));
        for y in ya..yb {
            for x in xa..xb {
                self.put(x, y, color);
            }
        }
    }

    pub fn blend_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>, alpha: f64) {
        let (xa, xb) = (x0.min(x1), x0.max(x1));
        let (ya, yb) = (y0.min(y1), y0.max(y1));
        for y in ya..yb {
            for x in xa..xb {
                self.blend(x, y, color, alpha);
            }
        }
    }

    /// One-pixel outline of the same rectangle `fill_rect` would cover.
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (xa, xb) = (x0.min(x1), x0.max(x1) - 1);
        let (ya, yb) = (y0.min(y1), y0.max(y1) - 1);
        if xb < xa || yb < ya {
            return;
        }
        self.line(xa, ya, xb, ya, color, 1);
        self.line(xa, yb, xb, yb, color, 1);
        self.line(xa, ya, xa, yb, color, 1);
        self.line(xb, ya, xb, yb, color, 1);
    }

    fn stamp(&mut self, x: i64, y: i64, color: Rgb<u8>, thickness: u32) {
        let t = thickness.max(1) as i64;
        let offset = (t - 1) / 2;
        for dy in 0..t {
            for dx in 0..t {
                self.put(x - offset + dx, y - offset + dy, color);
            }
        }
    }

    pub fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>, thickness: u32) {
        self.patterned_line(x0, y0, x1, y1, color, thickness, &[]);
    }

    /// Bresenham line whose pixels follow an on/off `pattern` of run
    /// lengths. An empty pattern draws a solid line.
    #[allow(clippy::too_many_arguments)]
    pub fn patterned_line(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        color: Rgb<u8>,
        thickness: u32,
        pattern: &[u32],
    ) {
        let period: u32 = pattern.iter().sum();
        let is_on = |step: u32| -> bool {
            if period == 0 {
                return true;
            }
            let mut pos = step % period;
            for (i, run) in pattern.iter().enumerate() {
                if pos < *run {
                    return i % 2 == 0;
                }
                pos -= run;
            }
            true
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let mut step = 0u32;

        loop {
            if is_on(step) {
                self.stamp(x, y, color, thickness);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step = step.wrapping_add(1);
        }
    }

    /// Left-aligned text with its top-left corner at `(x, y)`.
    pub fn text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let scale = scale.max(1) as i64;
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i64 * ADVANCE as i64 * scale;
            for (row, bits) in font::glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = origin + col as i64 * scale;
                    let py = y + row as i64 * scale;
                    self.fill_rect(px, py, px + scale, py + scale, color);
                }
            }
        }
    }

    pub fn text_centered(&mut self, cx: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let w = font::text_width(text, scale) as i64;
        self.text(cx - w / 2, y, text, color, scale);
    }

    pub fn text_right(&mut self, right: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let w = font::text_width(text, scale) as i64;
        self.text(right - w, y, text, color, scale);
    }

    /// Text rotated a quarter turn counter-clockwise, reading bottom to top,
    /// centred vertically on `cy` with its left edge at `x`.
    pub fn text_vertical(&mut self, x: i64, cy: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let scale = scale.max(1) as i64;
        let w = font::text_width(text, scale as u32) as i64;
        let bottom = cy + w / 2;
        for (i, c) in text.chars().enumerate() {
            let origin = bottom - i as i64 * ADVANCE as i64 * scale;
            for (row, bits) in font::glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = x + row as i64 * scale;
                    let py = origin - (col as i64 + 1) * scale;
                    self.fill_rect(px, py, px + scale, py + scale, color);
                }
            }
        }
    }

    /// Height in pixels of one text line at `scale`.
    pub fn line_height(scale: u32) -> i64 {
        (GLYPH_HEIGHT * scale.max(1)) as i64
    }
}
