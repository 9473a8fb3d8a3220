use super::canvas::Canvas;
use super::font;
use super::style::ChartStyle;

const MARGIN_LEFT: i64 = 72;
const MARGIN_RIGHT: i64 = 24;
const MARGIN_TOP: i64 = 48;
const MARGIN_BOTTOM: i64 = 56;
const TICK_LEN: i64 = 4;
const TARGET_TICKS: usize = 6;

/// Plot area in pixels plus the data ranges mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl PlotFrame {
    pub fn new(style: &ChartStyle, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: style.width as i64 - MARGIN_RIGHT,
            bottom: style.height as i64 - MARGIN_BOTTOM,
            x_range: widen(x_range),
            y_range: widen(y_range),
        }
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    pub fn x_px(&self, x: f64) -> i64 {
        let (lo, hi) = self.x_range;
        let t = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.left + (t * (self.right - self.left) as f64).round() as i64
    }

    /// Data values outside the y range are pinned to the frame edge.
    pub fn y_px(&self, y: f64) -> i64 {
        let (lo, hi) = self.y_range;
        let t = ((y - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.bottom - (t * (self.bottom - self.top) as f64).round() as i64
    }

    /// Inverse of [`PlotFrame::x_px`] for a pixel column.
    pub fn x_value(&self, px: i64) -> f64 {
        let (lo, hi) = self.x_range;
        let t = (px - self.left) as f64 / (self.right - self.left) as f64;
        lo + t * (hi - lo)
    }

    /// Horizontal grid lines and labelled ticks on the y axis.
    pub fn draw_y_axis(&self, canvas: &mut Canvas, style: &ChartStyle, label: &str) {
        let p = &style.palette;
        let (lo, hi) = self.y_range;
        let ticks = nice_ticks(lo, hi, TARGET_TICKS);
        let step = tick_step(&ticks);
        let half_line = Canvas::line_height(style.text_scale) / 2;
        for tick in &ticks {
            let y = self.y_px(*tick);
            canvas.line(self.left + 1, y, self.right, y, p.grid, 1);
            canvas.line(self.left - TICK_LEN, y, self.left, y, p.ink, 1);
            canvas.text_right(
                self.left - TICK_LEN - 3,
                y - half_line,
                &format_tick(*tick, step),
                p.ink,
                style.text_scale,
            );
        }
        canvas.line(self.left, self.top, self.left, self.bottom, p.ink, 1);
        canvas.text_vertical(10, (self.top + self.bottom) / 2, label, p.ink, style.text_scale);
    }

    /// Numeric ticks along the x axis.
    pub fn draw_x_axis(&self, canvas: &mut Canvas, style: &ChartStyle, label: &str) {
        let p = &style.palette;
        let (lo, hi) = self.x_range;
        let ticks = nice_ticks(lo, hi, TARGET_TICKS);
        let step = tick_step(&ticks);
        for tick in &ticks {
            let x = self.x_px(*tick);
            canvas.line(x, self.bottom, x, self.bottom + TICK_LEN, p.ink, 1);
            canvas.text_centered(
                x,
                self.bottom + TICK_LEN + 3,
                &format_tick(*tick, step),
                p.ink,
                style.text_scale,
            );
        }
        self.draw_baseline(canvas, style, label);
    }

    /// One label per category, centred in equal-width slots.
    pub fn draw_x_categories(
        &self,
        canvas: &mut Canvas,
        style: &ChartStyle,
        categories: &[String],
        label: &str,
    ) {
        let p = &style.palette;
        for (i, name) in categories.iter().enumerate() {
            let x = self.x_px(i as f64 + 0.5);
            canvas.line(x, self.bottom, x, self.bottom + TICK_LEN, p.ink, 1);
            canvas.text_centered(x, self.bottom + TICK_LEN + 3, name, p.ink, style.text_scale);
        }
        self.draw_baseline(canvas, style, label);
    }

    fn draw_baseline(&self, canvas: &mut Canvas, style: &ChartStyle, label: &str) {
        let p = &style.palette;
        canvas.line(self.left, self.bottom, self.right, self.bottom, p.ink, 1);
        let label_y = self.bottom + TICK_LEN + 3 + Canvas::line_height(style.text_scale) + 10;
        canvas.text_centered(
            (self.left + self.right) / 2,
            label_y,
            label,
            p.ink,
            style.text_scale,
        );
    }

    /// Colour swatch legend in the top-right corner of the plot area.
    pub fn draw_legend(
        &self,
        canvas: &mut Canvas,
        style: &ChartStyle,
        entries: &[(String, image::Rgb<u8>)],
    ) {
        if entries.is_empty() {
            return;
        }
        let p = &style.palette;
        let line_h = Canvas::line_height(style.text_scale);
        let swatch = line_h;
        let widest = entries
            .iter()
            .map(|(text, _)| font::text_width(text, style.text_scale) as i64)
            .max()
            .unwrap_or(0);
        let box_w = swatch + 6 + widest + 12;
        let box_h = entries.len() as i64 * (line_h + 6) + 6;
        let x0 = self.right - box_w - 8;
        let y0 = self.top + 8;

        canvas.fill_rect(x0, y0, x0 + box_w, y0 + box_h, p.background);
        canvas.stroke_rect(x0, y0, x0 + box_w, y0 + box_h, p.gray);
        for (i, (text, color)) in entries.iter().enumerate() {
            let y = y0 + 6 + i as i64 * (line_h + 6);
            canvas.fill_rect(x0 + 6, y, x0 + 6 + swatch, y + swatch, *color);
            canvas.text(x0 + 6 + swatch + 6, y, text, p.ink, style.text_scale);
        }
    }
}

/// Chart title centred above the plot area.
pub fn draw_title(canvas: &mut Canvas, style: &ChartStyle, title: &str) {
    canvas.text_centered(
        style.width as i64 / 2,
        14,
        title,
        style.palette.ink,
        style.title_scale,
    );
}

fn widen(range: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = range;
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, lo + 0.5)
    }
}

/// Round a raw step up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Evenly spaced "round" tick values covering `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if lo.is_nan() || hi.is_nan() || hi <= lo || target == 0 {
        return vec![lo];
    }
    let step = nice_step((hi - lo) / target as f64);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Format a tick with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let value = if value.abs() < step.abs() * 1e-9 {
        0.0
    } else {
        value
    };
    format!("{:.*}", decimals, value)
}
