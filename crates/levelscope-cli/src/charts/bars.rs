use super::canvas::Canvas;
use super::frame::{PlotFrame, draw_title};
use super::style::ChartStyle;
use image::Rgb;

const BAR_WIDTH: f64 = 0.6;
const CAP_HALF_WIDTH: i64 = 6;

/// One bar of a categorical chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub value: f64,
    /// Symmetric error bar half-length, if any.
    pub error: Option<f64>,
    pub label: String,
}

pub struct BarChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub y_range: (f64, f64),
    pub color: Rgb<u8>,
    /// Distance in data units between a bar top and its value label.
    pub label_offset: f64,
}

impl BarChart<'_> {
    pub fn draw(&self, style: &ChartStyle, bars: &[Bar]) -> Canvas {
        let p = &style.palette;
        let mut canvas = Canvas::new(style.width, style.height, p.background);
        let frame = PlotFrame::new(style, (0.0, bars.len().max(1) as f64), self.y_range);
        draw_title(&mut canvas, style, self.title);
        frame.draw_y_axis(&mut canvas, style, self.y_label);

        let baseline = frame.y_px(self.y_range.0.max(0.0));
        let line_h = Canvas::line_height(style.text_scale);
        for (i, bar) in bars.iter().enumerate() {
            let center = i as f64 + 0.5;
            let x0 = frame.x_px(center - BAR_WIDTH / 2.0);
            let x1 = frame.x_px(center + BAR_WIDTH / 2.0);
            let top = frame.y_px(bar.value);
            canvas.fill_rect(x0, top, x1, baseline, self.color);

            if let Some(err) = bar.error.filter(|e| *e > 0.0) {
                let cx = frame.x_px(center);
                let lo = frame.y_px(bar.value - err);
                let hi = frame.y_px(bar.value + err);
                canvas.line(cx, lo, cx, hi, p.ink, 1);
                canvas.line(cx - CAP_HALF_WIDTH, lo, cx + CAP_HALF_WIDTH, lo, p.ink, 1);
                canvas.line(cx - CAP_HALF_WIDTH, hi, cx + CAP_HALF_WIDTH, hi, p.ink, 1);
            }

            let label_y = frame.y_px(bar.value + self.label_offset) - line_h;
            canvas.text_centered(
                frame.x_px(center),
                label_y.max(frame.top - line_h - 2),
                &bar.label,
                p.ink,
                style.text_scale,
            );
        }

        let categories: Vec<String> = bars.iter().map(|b| b.category.clone()).collect();
        frame.draw_x_categories(&mut canvas, style, &categories, self.x_label);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::has_color;

    #[test]
    fn test_bars_use_series_color() {
        let style = ChartStyle::default();
        let chart = BarChart {
            title: "T",
            x_label: "Level",
            y_label: "V",
            y_range: (0.0, 1.0),
            color: style.palette.orange,
            label_offset: 0.02,
        };
        let bars = vec![Bar {
            category: "1".to_string(),
            value: 0.5,
            error: Some(0.1),
            label: "0.50".to_string(),
        }];
        let image = chart.draw(&style, &bars).into_image();
        assert!(has_color(&image, style.palette.orange));
    }

    #[test]
    fn test_zero_height_bar_draws_nothing_coloured() {
        let style = ChartStyle::default();
        let chart = BarChart {
            title: "T",
            x_label: "Level",
            y_label: "V",
            y_range: (0.0, 10.0),
            color: style.palette.green,
            label_offset: 0.2,
        };
        let bars = vec![Bar {
            category: "1".to_string(),
            value: 0.0,
            error: None,
            label: "0.0%".to_string(),
        }];
        let image = chart.draw(&style, &bars).into_image();
        assert!(!has_color(&image, style.palette.green));
    }
}
